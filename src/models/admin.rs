//! Admin lead model
//!
//! An admin lead is a prospective-student enquiry left on the public site
//! ("talk to admissions"), keyed by a unique email address.

use serde::{Deserialize, Deserializer, Serialize};

use super::record::{Document, RecordKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLead {
    pub name: String,
    #[serde(deserialize_with = "phone_from_number_or_string")]
    pub phone: String,
    pub email: String,
    pub program: String,
}

impl Document for AdminLead {
    const KIND: RecordKind = RecordKind::Admin;

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        vec![("email", self.email.clone())]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PhoneValue {
    Number(u64),
    Text(String),
}

fn phone_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PhoneValue::deserialize(deserializer)? {
        PhoneValue::Number(n) => n.to_string(),
        PhoneValue::Text(s) => s,
    })
}
