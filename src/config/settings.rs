//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allow_any: bool,
    /// Header set by a trusted reverse proxy carrying the client address,
    /// e.g. `x-forwarded-for`. Only set this when every request passes the proxy.
    pub forwarded_for_header: Option<String>,
}

/// Database configuration
///
/// `url = "memory"` keeps every record in process memory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Close connections idle for longer than this; unset keeps them open
    pub idle_timeout_seconds: Option<u64>,
    /// Recycle connections older than this; unset keeps them forever
    pub max_lifetime_seconds: Option<u64>,
}

/// Admin console authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub user_id: String,
    pub password: String,
    pub token_secret: String,
    pub token_ttl_seconds: i64,
    pub login_attempts_per_minute: u32,
}

/// News image upload configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    pub dir: String,
    pub public_prefix: String,
    pub max_image_bytes: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

impl DatabaseConfig {
    /// Marker URL selecting the process-local record store
    pub const IN_MEMORY_URL: &'static str = "memory";

    pub fn is_in_memory(&self) -> bool {
        self.url.eq_ignore_ascii_case(Self::IN_MEMORY_URL)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_seconds.map(Duration::from_secs)
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime_seconds.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("ADMISSIONS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PortalError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 4005,
                cors_allow_any: true,
                forwarded_for_header: None,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/admissions".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                idle_timeout_seconds: Some(600),
                max_lifetime_seconds: Some(1800),
            },
            auth: AuthConfig {
                user_id: "karan".to_string(),
                password: "12345678".to_string(),
                token_secret: "SECRET_KEY".to_string(),
                token_ttl_seconds: 3600,
                login_attempts_per_minute: 10,
            },
            uploads: UploadConfig {
                dir: "uploads".to_string(),
                public_prefix: "/uploads".to_string(),
                max_image_bytes: 2 * 1024 * 1024,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}
