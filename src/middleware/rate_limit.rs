//! Rate limiting middleware
//!
//! Throttles login attempts per client address so the single admin
//! credential pair cannot be brute forced at line rate.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::state::AppState;
use crate::utils::errors::{PortalError, Result};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_duration: Duration::from_secs(60),
        }
    }
}

/// Request timestamps seen for one client inside the window
#[derive(Debug, Clone, Default)]
struct RateLimitEntry {
    requests: Vec<Instant>,
}

impl RateLimitEntry {
    /// Drop requests outside the window
    fn cleanup(&mut self, now: Instant, window_duration: Duration) {
        self.requests
            .retain(|&time| now.saturating_duration_since(time) < window_duration);
    }
}

/// Sliding-window limiter keyed by client address
#[derive(Clone)]
pub struct RateLimitMiddleware {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimitMiddleware {
    /// Create a new RateLimitMiddleware instance
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record an attempt from `client`, failing when the window is full
    pub fn check_rate_limit(&self, client: &str) -> Result<()> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = entries.entry(client.to_string()).or_default();
        entry.cleanup(now, self.config.window_duration);

        if entry.requests.len() as u32 >= self.config.max_requests {
            warn!(client = client, "Login rate limit exceeded");
            return Err(PortalError::RateLimitExceeded);
        }

        entry.requests.push(now);
        debug!(client = client, attempts = entry.requests.len(), "Rate limit check passed");
        Ok(())
    }

    /// Remaining attempts for `client` in the current window
    pub fn remaining(&self, client: &str) -> u32 {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let used = entries.get(client).map_or(0, |entry| {
            let mut entry = entry.clone();
            entry.cleanup(Instant::now(), self.config.window_duration);
            entry.requests.len() as u32
        });
        self.config.max_requests.saturating_sub(used)
    }

    /// Forget clients whose attempts have all left the window
    pub fn cleanup_old_entries(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| {
            entry.cleanup(now, self.config.window_duration);
            !entry.requests.is_empty()
        });

        debug!(remaining_entries = entries.len(), "Cleaned up old rate limit entries");
    }
}

impl Default for RateLimitMiddleware {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

/// Key shared by every request whose client address is unknown
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Client key for a request.
///
/// With `forwarded_for_header` configured, the first address in that header
/// wins. Otherwise the peer IP is used. Requests with neither share the
/// `UNKNOWN_CLIENT` bucket, so behind an unconfigured proxy all clients are
/// throttled together.
fn client_key(req: &Request, forwarded_for_header: Option<&str>) -> String {
    let forwarded = forwarded_for_header
        .and_then(|name| req.headers().get(name))
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|addr| !addr.is_empty());

    if let Some(addr) = forwarded {
        return addr.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// axum middleware applied to the login route
pub async fn throttle_login(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> std::result::Result<Response, PortalError> {
    let key = client_key(&req, state.settings.server.forwarded_for_header.as_deref());
    state.login_limiter.check_rate_limit(&key)?;
    Ok(next.run(req).await)
}
