//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the public lead-intake API, the auth endpoints, and
//! the admin back-office API under a single Axum router. The marketing
//! site is served as static files at `/`; uploaded media is served
//! read-only at `/media`.

pub mod auth;
pub mod dashboard;
pub mod leads;
pub mod media;
pub mod public;
pub mod services;
pub mod settings;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Resolve the path to the static marketing site.
fn website_dir() -> PathBuf {
    std::env::var("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

/// Full application: API routes, media files at `/media`, site at `/`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let media_root = state.media.root().to_path_buf();

    Router::new()
        // Auth
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/signin", post(auth::signin))
        .route("/api/auth/signout", post(auth::signout))
        .route("/api/auth/verify-email", post(auth::verify_email))
        .route("/api/auth/me", get(auth::me))
        // Public site API
        .route("/api/contact", post(public::submit_contact))
        .route("/api/quote", post(public::submit_quote))
        .route("/api/services", get(public::list_services))
        .route("/api/settings", get(public::get_settings))
        // Admin back office
        .route("/api/admin/dashboard", get(dashboard::stats))
        .route("/api/admin/leads", get(leads::list_leads))
        .route("/api/admin/leads/export.csv", get(leads::export_csv))
        .route(
            "/api/admin/leads/{id}",
            patch(leads::update_status).delete(leads::delete_lead),
        )
        .route(
            "/api/admin/services",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/api/admin/services/{id}",
            patch(services::update_service).delete(services::delete_service),
        )
        .route(
            "/api/admin/media",
            get(media::list_media).post(media::upload_media),
        )
        .route("/api/admin/media/{id}", axum::routing::delete(media::delete_media))
        .route(
            "/api/admin/settings",
            get(settings::get_settings).put(settings::save_settings),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .nest_service("/media", ServeDir::new(media_root))
        .fallback_service(ServeDir::new(website_dir()).append_index_html_on_directories(true))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
