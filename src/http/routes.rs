use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Upper bound on the multipart body, above any configurable audio limit
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    // Browser clients upload from arbitrary origins; preflight requests get
    // a permissive answer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Audio processing pipeline
        .route("/meetings/process", post(handlers::process_audio))
        // Meeting retrieval and editing
        .route("/meetings", get(handlers::list_meetings))
        .route("/meetings/:meeting_id", get(handlers::get_meeting))
        .route(
            "/meetings/:meeting_id/speakers/:speaker_id",
            put(handlers::rename_speaker),
        )
        // Audio uploads exceed axum's 2 MiB default; the pipeline enforces
        // the configured per-request limit
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
