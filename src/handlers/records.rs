//! Admin-only listings of stored submissions

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::database::Collected;
use crate::middleware::AdminClaims;
use crate::models::Stored;
use crate::state::AppState;
use crate::utils::errors::{PortalError, Result};

/// GET /admins, /users, /messages: every record, newest first
pub async fn list_all<T: Collected>(
    State(state): State<AppState>,
    AdminClaims(claims): AdminClaims,
) -> Result<Json<Vec<Stored<T>>>> {
    let records = state.store().collection::<T>().list_all().await?;
    debug!(subject = %claims.sub, kind = %T::KIND, count = records.len(), "Listed records");
    Ok(Json(records))
}

/// GET /{kind}/:year/:month: records created within one calendar month (UTC)
pub async fn list_by_month<T: Collected>(
    State(state): State<AppState>,
    AdminClaims(claims): AdminClaims,
    path: std::result::Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Json<Vec<Stored<T>>>> {
    let Path((year, month)) = path.map_err(|rejection| PortalError::InvalidInput(rejection.body_text()))?;

    let records = state.store().collection::<T>().list_by_month(year, month).await?;
    debug!(
        subject = %claims.sub,
        kind = %T::KIND,
        year,
        month,
        count = records.len(),
        "Listed records for month"
    );
    Ok(Json(records))
}
