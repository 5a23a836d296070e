use super::response::TranscriptionResponse;
use crate::config::TranscriptionConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Speech-to-text capability, injected into the pipeline so tests can
/// substitute a fake
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8], content_type: &str) -> Result<TranscriptionResponse>;
}

/// HTTP client for a Deepgram-style transcription API
pub struct DeepgramClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl DeepgramClient {
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl Transcriber for DeepgramClient {
    async fn transcribe(&self, audio: &[u8], content_type: &str) -> Result<TranscriptionResponse> {
        info!(bytes = audio.len(), content_type, "sending audio for transcription");

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("diarize", "true"),
                ("punctuate", "true"),
                ("smart_format", "true"),
                ("paragraphs", "true"),
                ("detect_language", "true"),
            ])
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", content_type)
            .body(audio.to_vec())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::upstream("transcription", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                "transcription",
                format!("request failed with status {}", status),
            ));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream("transcription", format!("invalid response body: {}", e)))?;

        info!("transcription completed");

        Ok(parsed)
    }
}
