//! Admin login handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::services::IssuedToken;
use crate::state::AppState;
use crate::utils::errors::{PortalError, Result};

/// Credentials posted by the admin panel
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "UserId", alias = "userId")]
    pub user_id: String,
    pub password: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<IssuedToken>> {
    let Json(request) = payload.map_err(|rejection| PortalError::InvalidInput(rejection.body_text()))?;

    let issued = state
        .services
        .auth_service
        .login(&request.user_id, &request.password)?;

    Ok(Json(issued))
}
