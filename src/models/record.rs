//! Stored record envelope shared by every record kind

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Admin,
    Applicant,
    Message,
    News,
}

impl RecordKind {
    /// Table backing the collection
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Admin => "admins",
            RecordKind::Applicant => "applicants",
            RecordKind::Message => "messages",
            RecordKind::News => "news",
        }
    }

    /// Human readable name used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Admin => "Admin",
            RecordKind::Applicant => "User",
            RecordKind::Message => "Message",
            RecordKind::News => "News",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Document payload that can live in a collection.
///
/// Records are append/delete only, so a document never changes after insertion.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    /// Field values that must be unique within the collection, as `(field, value)`.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// A document as persisted by the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub doc: T,
    pub created_at: DateTime<Utc>,
}

impl<T> Stored<T> {
    pub fn new(doc: T, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            doc,
            created_at,
        }
    }
}
