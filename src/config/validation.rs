//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{PortalError, Result};
use super::Settings;

/// Longest token lifetime accepted: one year
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_upload_config(&settings.uploads)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(PortalError::Config(
            "Server host is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(PortalError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(PortalError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(PortalError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(PortalError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate admin authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.user_id.is_empty() || config.password.is_empty() {
        return Err(PortalError::Config(
            "Admin credentials are required".to_string()
        ));
    }

    if config.token_secret.is_empty() {
        return Err(PortalError::Config(
            "Token secret is required".to_string()
        ));
    }

    if config.token_ttl_seconds <= 0 {
        return Err(PortalError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    if config.token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
        return Err(PortalError::Config(
            format!("Token TTL cannot exceed {} seconds", MAX_TOKEN_TTL_SECONDS)
        ));
    }

    if config.login_attempts_per_minute == 0 {
        return Err(PortalError::Config(
            "Login attempts per minute must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate upload configuration
fn validate_upload_config(config: &super::UploadConfig) -> Result<()> {
    if config.dir.is_empty() {
        return Err(PortalError::Config(
            "Upload directory is required".to_string()
        ));
    }

    if !config.public_prefix.starts_with('/') {
        return Err(PortalError::Config(
            "Upload public prefix must start with '/'".to_string()
        ));
    }

    // The prefix is mounted as a nested route: no root, no trailing slash, no captures
    if config.public_prefix.ends_with('/') || config.public_prefix.contains([':', '*']) {
        return Err(PortalError::Config(
            format!("Upload public prefix is not a mountable path: {}", config.public_prefix)
        ));
    }

    if config.max_image_bytes == 0 {
        return Err(PortalError::Config(
            "Max image size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PortalError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PortalError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
