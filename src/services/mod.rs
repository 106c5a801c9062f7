//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod news;
pub mod storage;

// Re-export commonly used services
pub use auth::{AuthService, Claims, CredentialVerifier, IssuedToken, Role, StaticCredentials};
pub use news::{NewsService, RECENT_NEWS_LIMIT};
pub use storage::{DiskImageStorage, ImageStorage, ImageUpload};

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::database::RecordStore;
use crate::utils::clock::Clock;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub store: RecordStore,
    pub auth_service: AuthService,
    pub news_service: NewsService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        store: RecordStore,
        images: Arc<dyn ImageStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let auth_service = AuthService::from_config(&settings.auth, clock);
        let news_service = NewsService::new(store.clone(), images, settings.uploads.max_image_bytes);

        Self {
            store,
            auth_service,
            news_service,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let store_healthy = match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Record store health check failed");
                false
            }
        };

        ServiceHealthStatus {
            store_backend: self.store.backend(),
            store_healthy,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub store_backend: &'static str,
    pub store_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.store_healthy {
            issues.push(format!("{} record store unreachable", self.store_backend));
        }

        issues
    }
}
