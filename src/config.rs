use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub transcription: TranscriptionConfig,
    pub insights: InsightsConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Transcription Service (Deepgram-style speech-to-text API)
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_transcription_timeout")]
    pub timeout_secs: u64,
}

/// Insight Generation Service (Gemini-style text generation API)
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_insights_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_audio_bytes: default_max_audio_bytes(),
        }
    }
}

fn default_transcription_timeout() -> u64 {
    120
}

fn default_insights_timeout() -> u64 {
    60
}

fn default_max_audio_bytes() -> usize {
    50 * 1024 * 1024 // 50 MiB
}

impl Config {
    /// Load configuration from a file, with environment overrides
    /// (e.g. `MEETINGS__TRANSCRIPTION__API_KEY`).
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("MEETINGS").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check that every required credential/endpoint is present.
    /// Must pass before any network call is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.transcription.api_key.trim().is_empty() {
            return Err(Error::Config(
                "transcription.api_key is not set".to_string(),
            ));
        }
        if self.transcription.endpoint.trim().is_empty() {
            return Err(Error::Config(
                "transcription.endpoint is not set".to_string(),
            ));
        }
        if self.insights.api_key.trim().is_empty() {
            return Err(Error::Config("insights.api_key is not set".to_string()));
        }
        if self.insights.endpoint.trim().is_empty() {
            return Err(Error::Config("insights.endpoint is not set".to_string()));
        }
        if self.database.url.trim().is_empty() {
            return Err(Error::Config("database.url is not set".to_string()));
        }
        Ok(())
    }
}
