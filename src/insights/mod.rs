//! Insight extraction from meeting transcripts
//!
//! Asks the Insight Generation Service for a strict-JSON summary and task
//! list, then validates and repairs the reply. Generative services are not
//! contractually guaranteed to return well-formed JSON, so every degradation
//! path (unreachable service, prose-wrapped JSON, partial objects) collapses
//! into the same schema-complete `Insights` value.

mod client;
mod extract;

pub use client::{GeminiClient, InsightGenerator};
pub use extract::{extract_insights, render_transcript, Insights, TaskItem, NO_SPEECH_SUMMARY};
