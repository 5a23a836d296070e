use super::state::AppState;
use crate::error::Error;
use crate::store::{MeetingRecord, SpeakerRow, TaskRow, TranscriptRow};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(rename = "meetingId")]
    pub meeting_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MeetingResponse {
    pub meeting: MeetingRecord,
    pub transcripts: Vec<TranscriptRow>,
    pub tasks: Vec<TaskRow>,
    pub speakers: Vec<SpeakerRow>,
}

#[derive(Debug, Deserialize)]
pub struct RenameSpeakerRequest {
    pub custom_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListMeetingsParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /meetings/process
/// Accept a multipart form (audio, title, userId) and run the full pipeline
pub async fn process_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut audio: Vec<u8> = Vec::new();
    let mut content_type = "audio/wav".to_string();
    let mut title = String::new();
    let mut user_id = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("invalid multipart body: {}", e),
                );
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                if let Some(ct) = field.content_type() {
                    content_type = ct.to_string();
                }
                match field.bytes().await {
                    Ok(bytes) => audio = bytes.to_vec(),
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("failed to read audio field: {}", e),
                        );
                    }
                }
            }
            "title" => title = field.text().await.unwrap_or_default(),
            "userId" => user_id = field.text().await.unwrap_or_default(),
            other => info!("ignoring unexpected multipart field: {}", other),
        }
    }

    let request = crate::pipeline::ProcessRequest {
        audio,
        content_type,
        title,
        user_id,
    };

    match state.pipeline.process(request).await {
        Ok(meeting_id) => (
            StatusCode::OK,
            Json(ProcessResponse {
                success: true,
                meeting_id,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("audio processing failed: {}", e);
            error_response(status_for(&e), e.to_string())
        }
    }
}

/// GET /meetings?userId=...
/// List a user's meetings, newest first
pub async fn list_meetings(
    State(state): State<AppState>,
    Query(params): Query<ListMeetingsParams>,
) -> impl IntoResponse {
    let user_id = match params.user_id.as_deref().map(str::trim) {
        Some(user_id) if !user_id.is_empty() => user_id.to_string(),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "missing required query parameter: userId".to_string(),
            );
        }
    };

    match state.store.list_meetings(&user_id).await {
        Ok(meetings) => (StatusCode::OK, Json(meetings)).into_response(),
        Err(e) => {
            error!("failed to list meetings: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /meetings/:meeting_id
/// Fetch a stored meeting with its transcript, tasks, and speakers
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> impl IntoResponse {
    let meeting = match state.store.get_meeting(&meeting_id).await {
        Ok(Some(meeting)) => meeting,
        Ok(None) => {
            return error_response(
                StatusCode::NOT_FOUND,
                format!("meeting {} not found", meeting_id),
            );
        }
        Err(e) => {
            error!("failed to load meeting: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let transcripts = state.store.list_transcripts(&meeting_id).await;
    let tasks = state.store.list_tasks(&meeting_id).await;
    let speakers = state.store.list_speakers(&meeting_id).await;

    match (transcripts, tasks, speakers) {
        (Ok(transcripts), Ok(tasks), Ok(speakers)) => (
            StatusCode::OK,
            Json(MeetingResponse {
                meeting,
                transcripts,
                tasks,
                speakers,
            }),
        )
            .into_response(),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            error!("failed to load meeting details: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// PUT /meetings/:meeting_id/speakers/:speaker_id
/// Update a speaker's display name
pub async fn rename_speaker(
    State(state): State<AppState>,
    Path((meeting_id, speaker_id)): Path<(String, String)>,
    Json(req): Json<RenameSpeakerRequest>,
) -> impl IntoResponse {
    if req.custom_name.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "custom_name must not be empty".to_string(),
        );
    }

    match state
        .store
        .set_speaker_custom_name(&meeting_id, &speaker_id, req.custom_name.trim())
        .await
    {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            format!("speaker {} not found for meeting {}", speaker_id, meeting_id),
        ),
        Err(e) => {
            error!("failed to rename speaker: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
