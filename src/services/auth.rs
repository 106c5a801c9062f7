//! Authentication service implementation
//!
//! This service handles admin authentication for the admin console: it checks
//! a credential pair against a pluggable verifier and issues and verifies
//! signed, time-limited access tokens. The service keeps no session state;
//! a token is only revoked by expiring.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::validation::MAX_TOKEN_TTL_SECONDS;
use crate::config::AuthConfig;
use crate::utils::clock::Clock;
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_auth_event;

/// Roles a token can assert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

/// Decides whether a credential pair belongs to an operator.
///
/// Returns the subject the token is issued for.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, user_id: &str, password: &str) -> Option<String>;
}

/// A single configured credential pair
#[derive(Clone)]
pub struct StaticCredentials {
    user_id: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, user_id: &str, password: &str) -> Option<String> {
        (user_id == self.user_id && password == self.password).then(|| self.user_id.clone())
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// A freshly signed token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service for the admin console
#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        secret: &[u8],
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            verifier,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    /// Build the service from the `auth` configuration section
    pub fn from_config(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let verifier = Arc::new(StaticCredentials::new(&config.user_id, &config.password));
        Self::new(
            verifier,
            config.token_secret.as_bytes(),
            Duration::seconds(config.token_ttl_seconds.clamp(1, MAX_TOKEN_TTL_SECONDS)),
            clock,
        )
    }

    /// Exchange a credential pair for a signed admin token
    pub fn login(&self, user_id: &str, password: &str) -> Result<IssuedToken> {
        let Some(subject) = self.verifier.verify(user_id, password) else {
            log_auth_event(user_id, "login", false, Some("invalid credentials"));
            return Err(PortalError::InvalidCredentials);
        };

        let issued = self.issue(&subject, Role::Admin)?;
        log_auth_event(&subject, "login", true, None);
        Ok(issued)
    }

    fn issue(&self, subject: &str, role: Role) -> Result<IssuedToken> {
        let now = self.clock.now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a presented token. Every failure is `Unauthenticated`.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                PortalError::Unauthenticated
            })?
            .claims;

        if claims.exp <= self.clock.now().timestamp() {
            debug!(subject = %claims.sub, exp = claims.exp, "Token expired");
            return Err(PortalError::Unauthenticated);
        }

        if claims.role != Role::Admin {
            debug!(subject = %claims.sub, role = ?claims.role, "Token lacks admin role");
            return Err(PortalError::Unauthenticated);
        }

        Ok(claims)
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<Claims> {
        let header = header.ok_or_else(|| {
            debug!("Missing authorization header");
            PortalError::Unauthenticated
        })?;

        let (scheme, token) = header.trim().split_once(' ').ok_or(PortalError::Unauthenticated)?;
        if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
            debug!("Malformed authorization header");
            return Err(PortalError::Unauthenticated);
        }

        self.verify(token.trim())
    }

    pub fn token_ttl(&self) -> Duration {
        self.ttl
    }
}
