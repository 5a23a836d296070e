pub mod config;
pub mod error;
pub mod http;
pub mod insights;
pub mod pipeline;
pub mod store;
pub mod transcription;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{create_router, AppState};
pub use insights::{
    extract_insights, render_transcript, GeminiClient, InsightGenerator, Insights, TaskItem,
    NO_SPEECH_SUMMARY,
};
pub use pipeline::{Pipeline, ProcessRequest};
pub use store::{MeetingRecord, MeetingStore, NewMeeting, SpeakerRow, TaskRow, TranscriptRow};
pub use transcription::{
    normalize, DeepgramClient, Transcriber, TranscriptSegment, TranscriptionResponse,
};
