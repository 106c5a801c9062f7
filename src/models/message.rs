//! Contact message model

use serde::{Deserialize, Serialize};

use super::record::{Document, RecordKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Document for ContactMessage {
    const KIND: RecordKind = RecordKind::Message;
}
