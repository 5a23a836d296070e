//! HTTP API server for the recording UI
//!
//! This module provides the REST surface of the pipeline:
//! - POST /meetings/process - Run the audio-to-insight pipeline on an upload
//! - GET /meetings?userId=... - List a user's meetings, newest first
//! - GET /meetings/:id - Fetch a stored meeting with transcript/tasks/speakers
//! - PUT /meetings/:id/speakers/:speaker_id - Rename a speaker
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
