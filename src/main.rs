//! Admissions API
//!
//! Main application entry point

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use admissions_api::{
    config::Settings,
    create_router,
    database::{create_pool, run_migrations, RecordStore},
    services::{DiskImageStorage, ImageStorage},
    state::AppState,
    utils::{clock::SystemClock, logging, Clock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", admissions_api::info());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let store = if settings.database.is_in_memory() {
        warn!("Using the in-memory record store, data is lost on restart");
        RecordStore::in_memory(clock.clone())
    } else {
        info!("Connecting to database...");
        let pool = create_pool(&settings.database).await?;

        info!("Running database migrations...");
        run_migrations(&pool).await?;

        RecordStore::postgres(pool, clock.clone())
    };

    let images = DiskImageStorage::from_config(&settings.uploads);
    images.ensure_dir().await?;
    info!(dir = %images.dir().display(), "Upload directory ready");
    let images: Arc<dyn ImageStorage> = Arc::new(images);

    let bind_address = settings.bind_address();
    let state = AppState::new(settings, store, images, clock);
    spawn_limiter_cleanup(state.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    info!("Server listening on {}", bind_address);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Periodically forget clients with no recent login attempts
fn spawn_limiter_cleanup(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            state.login_limiter.cleanup_old_entries();
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
