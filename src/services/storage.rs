//! Image storage for news posts
//!
//! Uploaded images are written to a local directory that the HTTP layer also
//! serves statically under the configured public prefix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers::{file_extension, format_bytes, generate_random_string};

const STORED_NAME_LENGTH: usize = 24;

/// An image received from the admin console
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reject anything that is not an image or is larger than `max_bytes`
    pub fn validate(&self, max_bytes: usize) -> Result<()> {
        let content_type = self.content_type.as_deref().unwrap_or("application/octet-stream");
        if !content_type.to_ascii_lowercase().starts_with("image/") {
            return Err(PortalError::UnsupportedMedia(content_type.to_string()));
        }

        if self.bytes.len() > max_bytes {
            return Err(PortalError::PayloadTooLarge { limit: max_bytes });
        }

        Ok(())
    }

    /// Extension for the stored file: the client's, else the MIME subtype
    fn extension(&self) -> Option<String> {
        self.file_name.as_deref().and_then(file_extension).or_else(|| {
            let subtype = self.content_type.as_deref()?.split('/').nth(1)?;
            let subtype = subtype.split(['+', ';']).next()?.trim();
            file_extension(&format!("image.{subtype}"))
        })
    }
}

/// External file storage collaborator
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Persist the image and return its public reference
    async fn save(&self, upload: &ImageUpload) -> Result<String>;

    /// Delete the image behind a reference previously returned by `save`
    async fn remove(&self, image_ref: &str) -> Result<()>;
}

/// Stores images as files in one directory
#[derive(Debug, Clone)]
pub struct DiskImageStorage {
    dir: PathBuf,
    public_prefix: String,
}

impl DiskImageStorage {
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(&config.dir, &config.public_prefix)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    fn stored_name(upload: &ImageUpload) -> String {
        let stem = generate_random_string(STORED_NAME_LENGTH);
        match upload.extension() {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem,
        }
    }

    /// Path inside the upload directory for a public reference; only the base name is used
    fn resolve(&self, image_ref: &str) -> Option<PathBuf> {
        let name = Path::new(image_ref).file_name()?;
        Some(self.dir.join(name))
    }
}

#[async_trait]
impl ImageStorage for DiskImageStorage {
    async fn save(&self, upload: &ImageUpload) -> Result<String> {
        let name = Self::stored_name(upload);
        let path = self.dir.join(&name);

        tokio::fs::write(&path, &upload.bytes).await.map_err(|e| {
            PortalError::StorageFailure(format!("failed to write {}: {e}", path.display()))
        })?;

        info!(
            file = %name,
            size = %format_bytes(upload.bytes.len()),
            "Stored news image"
        );
        Ok(format!("{}/{}", self.public_prefix, name))
    }

    async fn remove(&self, image_ref: &str) -> Result<()> {
        let path = self
            .resolve(image_ref)
            .ok_or_else(|| PortalError::InvalidInput(format!("not an image reference: {image_ref}")))?;

        tokio::fs::remove_file(&path).await?;
        debug!(path = %path.display(), "Removed news image");
        Ok(())
    }
}
