//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod record;
pub mod admin;
pub mod applicant;
pub mod message;
pub mod news;

// Re-export commonly used models
pub use record::{Document, RecordKind, Stored};
pub use admin::AdminLead;
pub use applicant::Applicant;
pub use message::ContactMessage;
pub use news::{NewsPost, CreateNewsRequest};
