//! News publishing service
//!
//! Creating a post stores its image first and then the record; deleting a
//! post removes the record and then makes a best-effort attempt at the image.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::database::RecordStore;
use crate::models::{CreateNewsRequest, NewsPost, Stored};
use crate::services::storage::{ImageStorage, ImageUpload};
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_admin_action;

/// Number of posts on the public news feed
pub const RECENT_NEWS_LIMIT: usize = 5;

#[derive(Clone)]
pub struct NewsService {
    store: RecordStore,
    images: Arc<dyn ImageStorage>,
    max_image_bytes: usize,
}

impl NewsService {
    pub fn new(store: RecordStore, images: Arc<dyn ImageStorage>, max_image_bytes: usize) -> Self {
        Self {
            store,
            images,
            max_image_bytes,
        }
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// Publish a post together with its image
    pub async fn create(
        &self,
        actor: &str,
        request: CreateNewsRequest,
        image: Option<ImageUpload>,
    ) -> Result<Stored<NewsPost>> {
        let image = match image {
            Some(image) if !image.is_empty() => image,
            _ => return Err(PortalError::MissingAttachment),
        };
        image.validate(self.max_image_bytes)?;

        let image_ref = self.images.save(&image).await?;
        let post = NewsPost {
            title: request.title,
            description: request.description,
            image: image_ref.clone(),
        };

        match self.store.news.insert(post).await {
            Ok(stored) => {
                log_admin_action(actor, "create_news", Some(&stored.id.to_string()), Some(&stored.doc.title));
                Ok(stored)
            }
            Err(err) => {
                if let Err(cleanup) = self.images.remove(&image_ref).await {
                    warn!(image = %image_ref, error = %cleanup, "Failed to remove orphaned news image");
                }
                Err(err)
            }
        }
    }

    /// Newest posts first
    pub async fn list_recent(&self) -> Result<Vec<Stored<NewsPost>>> {
        self.store.news.list_recent(RECENT_NEWS_LIMIT).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Stored<NewsPost>> {
        self.store.news.find_by_id(id).await
    }

    /// Delete a post. Failing to delete its image does not fail the call.
    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<Stored<NewsPost>> {
        let removed = self.store.news.delete_by_id(id).await?;

        if let Err(err) = self.images.remove(&removed.doc.image).await {
            warn!(
                news_id = %removed.id,
                image = %removed.doc.image,
                error = %err,
                "Could not delete news image, continuing"
            );
        }

        log_admin_action(actor, "delete_news", Some(&removed.id.to_string()), None);
        Ok(removed)
    }
}
