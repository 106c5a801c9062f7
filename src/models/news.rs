//! News post model

use serde::{Deserialize, Serialize};

use super::record::{Document, RecordKind};

/// A published news item. `image` is the public path of its stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPost {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Document for NewsPost {
    const KIND: RecordKind = RecordKind::News;
}

/// News fields supplied by the admin alongside the uploaded image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateNewsRequest {
    pub title: String,
    pub description: String,
}
