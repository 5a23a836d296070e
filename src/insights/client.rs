use crate::config::InsightsConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

/// Text generation capability, injected so tests can substitute a fake
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Send a prompt and return the raw generated text
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// HTTP client for a Gemini-style generateContent API
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: &InsightsConfig) -> Result<Self> {
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
impl InsightGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        info!(prompt_chars = prompt.len(), "requesting meeting insights");

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::upstream("insight generation", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                "insight generation",
                format!("request failed with status {}", status),
            ));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            Error::upstream("insight generation", format!("invalid response body: {}", e))
        })?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        info!("insight generation completed");

        Ok(text)
    }
}
