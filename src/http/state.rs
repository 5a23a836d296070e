use crate::pipeline::Pipeline;
use crate::store::MeetingStore;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The audio processing pipeline
    pub pipeline: Arc<Pipeline>,

    /// Store handle for meeting retrieval and speaker renames
    pub store: MeetingStore,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, store: MeetingStore) -> Self {
        Self { pipeline, store }
    }
}
