//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the admissions backend.

use tracing::{info, warn, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::LoggingConfig;
use crate::models::RecordKind;
use crate::utils::errors::{PortalError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| PortalError::Config(format!("Invalid log filter: {e}")))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "admissions-api.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PortalError::Config(format!("Logging already initialized: {e}")))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a public submission that was stored
pub fn log_record_ingested(kind: RecordKind, record_id: &str) {
    info!(
        kind = %kind,
        record_id = record_id,
        "Record ingested"
    );
}

/// Log admin actions
pub fn log_admin_action(subject: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin = subject,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log authentication attempts
pub fn log_auth_event(subject: &str, action: &str, success: bool, details: Option<&str>) {
    if success {
        info!(
            subject = subject,
            action = action,
            details = details,
            "Authentication event: success"
        );
    } else {
        warn!(
            subject = subject,
            action = action,
            details = details,
            "Authentication event: failure"
        );
    }
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
