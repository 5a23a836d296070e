//! Pipeline Orchestrator
//!
//! Sequences the three stages for one submitted audio artifact:
//! transcribe + normalize, extract insights, persist. Each invocation is
//! request-scoped and stateless; concurrent invocations only share the store.

use crate::error::{Error, Result};
use crate::insights::{extract_insights, render_transcript, InsightGenerator};
use crate::store::{MeetingStore, NewMeeting};
use crate::transcription::{normalize, Transcriber};
use std::sync::Arc;
use tracing::info;

/// One audio submission, as received from the HTTP layer
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub audio: Vec<u8>,
    pub content_type: String,
    pub title: String,
    pub user_id: String,
}

/// The audio-to-structured-insight pipeline.
///
/// Clients are injected rather than constructed internally so tests can run
/// the whole pipeline against fakes.
pub struct Pipeline {
    transcriber: Arc<dyn Transcriber>,
    generator: Arc<dyn InsightGenerator>,
    store: MeetingStore,
    max_audio_bytes: usize,
}

impl Pipeline {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<dyn InsightGenerator>,
        store: MeetingStore,
        max_audio_bytes: usize,
    ) -> Self {
        Self {
            transcriber,
            generator,
            store,
            max_audio_bytes,
        }
    }

    /// Run the full pipeline for one audio artifact and return the created
    /// meeting id.
    ///
    /// Input validation happens before any external call. A transcription
    /// failure is fatal; an insight generation failure degrades to a
    /// fallback summary inside the extractor; a storage failure aborts the
    /// remaining writes and surfaces which entity failed.
    pub async fn process(&self, request: ProcessRequest) -> Result<String> {
        self.validate(&request)?;

        info!(title = %request.title, "processing audio for meeting");

        let response = self
            .transcriber
            .transcribe(&request.audio, &request.content_type)
            .await?;

        let segments = normalize(&response, response.duration());
        info!(segments = segments.len(), "transcript normalized");

        let transcript = render_transcript(&segments);
        let insights = extract_insights(self.generator.as_ref(), &transcript).await;

        let meeting_id = self
            .store
            .save_meeting(
                NewMeeting {
                    user_id: &request.user_id,
                    title: &request.title,
                    summary: &insights.summary,
                },
                &segments,
                &insights.tasks,
            )
            .await?;

        info!(%meeting_id, "audio processed successfully");

        Ok(meeting_id)
    }

    fn validate(&self, request: &ProcessRequest) -> Result<()> {
        if request.audio.is_empty() {
            return Err(Error::Validation("missing required field: audio".to_string()));
        }
        if request.title.trim().is_empty() {
            return Err(Error::Validation("missing required field: title".to_string()));
        }
        if request.user_id.trim().is_empty() {
            return Err(Error::Validation(
                "missing required field: userId".to_string(),
            ));
        }
        if request.audio.len() > self.max_audio_bytes {
            return Err(Error::Validation(format!(
                "audio exceeds maximum size of {} bytes",
                self.max_audio_bytes
            )));
        }
        Ok(())
    }
}
