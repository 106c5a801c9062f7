//! Shared application state
//!
//! One `AppState` is built at startup and cloned into every request handler.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::database::RecordStore;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimitMiddleware};
use crate::services::{ImageStorage, ServiceFactory};
use crate::utils::clock::Clock;

#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub login_limiter: RateLimitMiddleware,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        store: RecordStore,
        images: Arc<dyn ImageStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let services = ServiceFactory::new(&settings, store, images, clock);
        let login_limiter = RateLimitMiddleware::new(RateLimitConfig {
            max_requests: settings.auth.login_attempts_per_minute,
            window_duration: Duration::from_secs(60),
        });

        Self {
            services,
            login_limiter,
            settings: Arc::new(settings),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.services.store
    }
}
