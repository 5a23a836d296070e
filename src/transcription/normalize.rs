use super::response::{Paragraph, TranscriptionResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contiguous span of transcript text attributed to one speaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Display label, e.g. "Speaker 0" or "Unknown"
    pub speaker_label: String,

    /// Transcribed text, non-empty after trimming
    pub text: String,

    /// Offset of the segment start within the audio, in seconds
    pub start_seconds: f64,

    /// Offset of the segment end, always >= start_seconds
    pub end_seconds: f64,
}

/// Convert a raw Transcription Service response into ordered,
/// speaker-labeled segments.
///
/// Upstream diarization can be flaky, partial, or entirely absent depending
/// on audio quality; downstream consumers always receive the same shape:
/// - diarized paragraphs -> one segment per paragraph, in source order
/// - flat transcript only -> a single "Speaker 0" segment covering the audio
/// - nothing usable -> an empty Vec, meaning "no speech detected"
///
/// Whitespace-only segments are dropped. Never panics or errors.
pub fn normalize(
    response: &TranscriptionResponse,
    known_duration: Option<f64>,
) -> Vec<TranscriptSegment> {
    let Some(alternative) = response.primary_alternative() else {
        debug!("transcription response has no channels/alternatives");
        return Vec::new();
    };

    if let Some(paragraphs) = &alternative.paragraphs {
        if !paragraphs.paragraphs.is_empty() {
            let segments: Vec<TranscriptSegment> = paragraphs
                .paragraphs
                .iter()
                .filter_map(paragraph_to_segment)
                .collect();
            debug!(count = segments.len(), "normalized diarized paragraphs");
            return segments;
        }
    }

    let flat = alternative.transcript.trim();
    if !flat.is_empty() {
        let duration = known_duration.or_else(|| response.duration()).unwrap_or(0.0);
        debug!("no diarization available, emitting single-speaker segment");
        return vec![TranscriptSegment {
            speaker_label: "Speaker 0".to_string(),
            text: flat.to_string(),
            start_seconds: 0.0,
            end_seconds: duration.max(0.0),
        }];
    }

    Vec::new()
}

fn paragraph_to_segment(paragraph: &Paragraph) -> Option<TranscriptSegment> {
    let text = paragraph
        .sentences
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return None;
    }

    let start = paragraph
        .start
        .or_else(|| paragraph.sentences.first().and_then(|s| s.start))
        .unwrap_or(0.0);
    let end = paragraph
        .end
        .or_else(|| paragraph.sentences.last().and_then(|s| s.end))
        .unwrap_or(start);

    Some(TranscriptSegment {
        speaker_label: speaker_label(paragraph.speaker),
        text,
        start_seconds: start,
        end_seconds: end.max(start),
    })
}

/// "Speaker {id}" for valid non-negative speaker indices, "Unknown" otherwise
fn speaker_label(speaker: Option<i64>) -> String {
    match speaker {
        Some(id) if id >= 0 => format!("Speaker {}", id),
        _ => "Unknown".to_string(),
    }
}
