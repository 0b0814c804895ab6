//! sehat-server
//!
//! HTTP API for screenings: create (multipart + model call + insert), list
//! patients and daily trends, plus optional hosting of the prebuilt front-end.

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod static_files;

use state::AppState;

/// Largest accepted create-screening body (form fields plus image).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Assemble the application router.
///
/// With `static_dir` set, every path not matched by the API is served from
/// that directory, falling back to its `index.html`.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/api/screen",
            post(routes::screenings::create_screening)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/patients", get(routes::patients::list_patients))
        .route("/api/trends", get(routes::trends::list_trends));

    if let Some(dir) = static_dir {
        app = app.fallback_service(static_files::spa_service(dir));
    }

    app.layer(axum_mw::from_fn(middleware::audit::request_log))
        .layer(cors)
        .with_state(state)
}
