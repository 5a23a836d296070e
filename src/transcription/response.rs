use serde::Deserialize;

/// JSON document returned by the Transcription Service.
///
/// Every field is optional: the service may return diarized paragraph groups,
/// a flat transcript string, or nothing usable at all, and the normalizer has
/// to cope with each shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub results: Option<Results>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub paragraphs: Option<Paragraphs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraphs {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

/// One diarized paragraph group: a speaker index plus its sentences
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub speaker: Option<i64>,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

impl TranscriptionResponse {
    /// Total audio duration reported by the service, if any
    pub fn duration(&self) -> Option<f64> {
        self.metadata.as_ref().and_then(|m| m.duration)
    }

    /// First alternative of the first channel, where both diarized
    /// paragraphs and the flat transcript live
    pub fn primary_alternative(&self) -> Option<&Alternative> {
        self.results
            .as_ref()?
            .channels
            .first()?
            .alternatives
            .first()
    }
}
