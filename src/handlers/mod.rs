//! HTTP handlers module
//!
//! This module contains the request handlers and the router that wires them up:
//! - Public submission endpoints (admission leads, applications, contact messages)
//! - Admin login and the token-guarded listings
//! - News publishing and the public news feed

pub mod auth;
pub mod health;
pub mod ingestion;
pub mod news;
pub mod records;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::logging::{log_response, make_request_span};
use crate::middleware::{require_admin, throttle_login};
use crate::models::{AdminLead, Applicant, ContactMessage};
use crate::state::AppState;
use crate::utils::errors::PortalError;

/// Headroom on top of the image cap for the other multipart fields
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let guard = middleware::from_fn_with_state(state.clone(), require_admin);
    let upload_limit = state.settings.uploads.max_image_bytes + MULTIPART_OVERHEAD_BYTES;

    let mut app = Router::new()
        .route(
            "/login",
            post(auth::login).route_layer(middleware::from_fn_with_state(state.clone(), throttle_login)),
        )
        .route(
            "/admins",
            post(ingestion::submit::<AdminLead>)
                .merge(get(records::list_all::<AdminLead>).route_layer(guard.clone())),
        )
        .route(
            "/users",
            post(ingestion::submit::<Applicant>)
                .merge(get(records::list_all::<Applicant>).route_layer(guard.clone())),
        )
        .route(
            "/messages",
            post(ingestion::submit::<ContactMessage>)
                .merge(get(records::list_all::<ContactMessage>).route_layer(guard.clone())),
        )
        .route(
            "/admins/:year/:month",
            get(records::list_by_month::<AdminLead>).route_layer(guard.clone()),
        )
        .route(
            "/users/:year/:month",
            get(records::list_by_month::<Applicant>).route_layer(guard.clone()),
        )
        .route(
            "/messages/:year/:month",
            get(records::list_by_month::<ContactMessage>).route_layer(guard.clone()),
        )
        .route(
            "/news",
            get(news::list_recent).merge(
                post(news::create)
                    .route_layer(guard.clone())
                    .layer(DefaultBodyLimit::max(upload_limit)),
            ),
        )
        .route(
            "/news/:id",
            get(news::get).merge(axum::routing::delete(news::delete).route_layer(guard)),
        )
        .route("/health", get(health::health))
        .nest_service(
            &state.settings.uploads.public_prefix,
            ServeDir::new(&state.settings.uploads.dir),
        )
        .fallback(|| async { PortalError::NotFound("Route".to_string()) });

    if state.settings.server.cors_allow_any {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        );
    }

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(make_request_span)
            .on_response(log_response),
    )
    .with_state(state)
}
