//! Transcription Service integration and response normalization
//!
//! The client sends raw audio bytes to a Deepgram-style speech-to-text API.
//! The normalizer converts whatever comes back (diarized paragraphs, a flat
//! transcript, or nothing) into one uniform segment sequence.

mod client;
mod normalize;
mod response;

pub use client::{DeepgramClient, Transcriber};
pub use normalize::{normalize, TranscriptSegment};
pub use response::TranscriptionResponse;
