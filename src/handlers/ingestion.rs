//! Public submission endpoints
//!
//! Admission enquiries, applications and contact messages all follow the same
//! path: parse the JSON body, insert it into its collection, acknowledge.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::database::Collected;
use crate::state::AppState;
use crate::utils::errors::{PortalError, Result};
use crate::utils::logging::log_record_ingested;

/// Acknowledgement returned for a stored submission
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub id: Uuid,
}

/// POST /admins, /users and /messages
pub async fn submit<T: Collected>(
    State(state): State<AppState>,
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> Result<Json<SubmissionReceipt>> {
    let Json(document) = payload.map_err(|rejection| PortalError::InvalidInput(rejection.body_text()))?;

    let stored = state.store().collection::<T>().insert(document).await?;
    log_record_ingested(T::KIND, &stored.id.to_string());

    Ok(Json(SubmissionReceipt {
        message: format!("{} saved", T::KIND.label()),
        id: stored.id,
    }))
}
