//! News endpoints
//!
//! Reads are public; publishing and deleting need an admin token.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::middleware::AdminClaims;
use crate::models::{CreateNewsRequest, NewsPost, Stored};
use crate::services::ImageUpload;
use crate::state::AppState;
use crate::utils::errors::{PortalError, Result};

#[derive(Debug, Serialize)]
pub struct DeleteReceipt {
    pub message: &'static str,
}

/// POST /news (multipart: title, description, image)
pub async fn create(
    State(state): State<AppState>,
    AdminClaims(claims): AdminClaims,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Stored<NewsPost>>)> {
    let news = &state.services.news_service;
    // A body that is not multipart cannot carry the image
    let mut multipart = multipart.map_err(|_| PortalError::MissingAttachment)?;
    let limit = news.max_image_bytes();

    let mut request = CreateNewsRequest::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                request.title = field.text().await.map_err(|err| multipart_error(err, limit))?;
            }
            "description" => {
                request.description = field.text().await.map_err(|err| multipart_error(err, limit))?;
            }
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|err| multipart_error(err, limit))?;
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    let stored = news.create(&claims.sub, request, image).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /news: the latest posts
pub async fn list_recent(State(state): State<AppState>) -> Result<Json<Vec<Stored<NewsPost>>>> {
    let posts = state.services.news_service.list_recent().await?;
    Ok(Json(posts))
}

/// GET /news/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Stored<NewsPost>>> {
    let id = parse_news_id(&id)?;
    let post = state.services.news_service.get(id).await?;
    Ok(Json(post))
}

/// DELETE /news/:id
pub async fn delete(
    State(state): State<AppState>,
    AdminClaims(claims): AdminClaims,
    Path(id): Path<String>,
) -> Result<Json<DeleteReceipt>> {
    let id = parse_news_id(&id)?;
    state.services.news_service.delete(&claims.sub, id).await?;
    Ok(Json(DeleteReceipt {
        message: "News deleted successfully",
    }))
}

/// Ids that cannot exist are reported the same way as ids that do not
fn parse_news_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| PortalError::NotFound("News".to_string()))
}

fn multipart_error(err: MultipartError, limit: usize) -> PortalError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PortalError::PayloadTooLarge { limit }
    } else {
        PortalError::InvalidInput(err.body_text())
    }
}
