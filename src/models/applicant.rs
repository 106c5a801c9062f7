//! Applicant model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Document, RecordKind};

/// Admission form submitted by a prospective student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub full_name: String,
    #[serde(rename = "dob", alias = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub category: String,
    pub father_name: String,
    pub mother_name: String,
    pub previous_school: String,
    pub course: String,
}

impl Document for Applicant {
    const KIND: RecordKind = RecordKind::Applicant;
}
