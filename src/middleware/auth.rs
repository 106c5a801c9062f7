//! Authentication middleware
//!
//! Guards admin-only routes: the bearer token is verified on every request
//! and the resulting claims are handed to the handler.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::services::auth::Claims;
use crate::state::AppState;
use crate::utils::errors::PortalError;

/// Reject the request unless it carries a valid admin token
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, PortalError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = state.services.auth_service.verify_bearer(header)?;
    debug!(subject = %claims.sub, path = %req.uri().path(), "Admin request authorized");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Claims of the admin making the request; only available behind `require_admin`
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminClaims {
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AdminClaims)
            .ok_or(PortalError::Unauthenticated)
    }
}
