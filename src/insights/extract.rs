use super::client::InsightGenerator;
use crate::transcription::TranscriptSegment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Summary returned when the transcript carries no real content
pub const NO_SPEECH_SUMMARY: &str = "No speech detected in the recording.";

/// Summary substituted when the Insight Generation Service is unreachable
/// or returns a non-success status
const UNAVAILABLE_SUMMARY: &str = "Summary temporarily unavailable.";

/// Summary substituted when the service replies but the payload contains
/// no parseable JSON object
const INVALID_FORMAT_SUMMARY: &str =
    "Meeting processed, but the generated summary was not in a usable format.";

/// Base summary used when a parsed payload carries no usable summary field
const DEFAULT_SUMMARY: &str = "Meeting analysis completed successfully.";

/// Transcripts shorter than this (after trimming) are treated as empty and
/// never sent to the generation service
const MIN_TRANSCRIPT_CHARS: usize = 10;

/// An action item extracted from the meeting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskItem {
    pub task: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
}

/// Structured insights derived from a transcript.
///
/// `summary` is always non-empty and `tasks` is always present, no matter
/// what the generation service returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub summary: String,
    pub tasks: Vec<TaskItem>,
}

/// Flatten segments into the "{label}: {text}" form the prompt expects,
/// blank-line separated, in segment order
pub fn render_transcript(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|s| format!("{}: {}", s.speaker_label, s.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(transcript: &str) -> String {
    format!(
        "Analyze this meeting transcript and extract:\n\
         1. A concise summary (2-3 sentences)\n\
         2. Action items/tasks with owners and deadlines if mentioned\n\
         \n\
         Transcript:\n\
         {}\n\
         \n\
         Respond with valid JSON in this format:\n\
         {{\n\
           \"summary\": \"Brief meeting summary...\",\n\
           \"tasks\": [\n\
             {{\n\
               \"task\": \"Task description\",\n\
               \"owner\": \"Person name or null\",\n\
               \"deadline\": \"Deadline or null\"\n\
             }}\n\
           ]\n\
         }}",
        transcript
    )
}

/// Derive validated insights from a flattened transcript.
///
/// Every external response is treated as untrusted: network failures,
/// non-success statuses, prose-wrapped JSON, and partial objects all degrade
/// to a schema-complete fallback. This function never fails.
pub async fn extract_insights(generator: &dyn InsightGenerator, transcript: &str) -> Insights {
    if transcript.trim().len() < MIN_TRANSCRIPT_CHARS {
        return Insights {
            summary: NO_SPEECH_SUMMARY.to_string(),
            tasks: Vec::new(),
        };
    }

    let raw = match generator.generate(&build_prompt(transcript)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("insight generation failed, using fallback summary: {}", e);
            return Insights {
                summary: UNAVAILABLE_SUMMARY.to_string(),
                tasks: Vec::new(),
            };
        }
    };

    let Some(candidate) = extract_json_object(&raw) else {
        warn!("insight response contained no JSON object");
        return Insights {
            summary: INVALID_FORMAT_SUMMARY.to_string(),
            tasks: Vec::new(),
        };
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => merge_over_defaults(&value),
        Err(e) => {
            warn!("insight response JSON failed to parse: {}", e);
            Insights {
                summary: INVALID_FORMAT_SUMMARY.to_string(),
                tasks: Vec::new(),
            }
        }
    }
}

/// Greedy first-`{`-to-last-`}` slice; the generation service may wrap its
/// JSON in prose or markdown fences.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Field-by-field overwrite of the default insights value from the parsed
/// payload. Only the two known top-level keys are trusted, and only when
/// type-valid; anything else keeps the default.
fn merge_over_defaults(value: &Value) -> Insights {
    let mut insights = Insights {
        summary: DEFAULT_SUMMARY.to_string(),
        tasks: Vec::new(),
    };

    if let Some(summary) = value.get("summary").and_then(Value::as_str) {
        if !summary.trim().is_empty() {
            insights.summary = summary.to_string();
        }
    }

    if let Some(tasks) = value.get("tasks").and_then(Value::as_array) {
        insights.tasks = tasks.iter().filter_map(task_from_value).collect();
    }

    insights
}

fn task_from_value(value: &Value) -> Option<TaskItem> {
    let task = value.get("task")?.as_str()?.trim();
    if task.is_empty() {
        return None;
    }

    Some(TaskItem {
        task: task.to_string(),
        owner: optional_string(value.get("owner")),
        deadline: optional_string(value.get("deadline")),
    })
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
