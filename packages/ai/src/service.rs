// ABOUTME: Text-generation client behind the `Summarizer` trait
// ABOUTME: Sends a prompt and returns the generated text

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const DEFAULT_MAX_TOKENS: u32 = 512;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("AI service returned no text")]
    EmptyResponse,

    #[error("Invalid AI service configuration: {0}")]
    Configuration(String),
}

pub type SummaryResult<T> = Result<T, SummaryError>;

/// Anything that can turn a prompt into summary text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> SummaryResult<String>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    text: String,
}

/// Summarizer backed by an HTTP text-generation endpoint
pub struct HttpSummarizer {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> SummaryResult<Self> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SummaryError::Configuration(format!(
                "AI summary URL must be http(s): {}",
                url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            url,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, prompt: &str) -> SummaryResult<String> {
        let request = GenerateRequest {
            prompt,
            max_tokens: DEFAULT_MAX_TOKENS,
        };

        info!("Requesting AI summary: prompt_chars={}", prompt.len());

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("AI summary request timed out after {}s", REQUEST_TIMEOUT_SECS);
            } else {
                error!("AI summary request failed: {}", e);
            }
            SummaryError::RequestFailed(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("AI service error: {} - {}", status, body);
            return Err(SummaryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::ParseError(e.to_string()))?;

        let text = parsed.text.trim();
        if text.is_empty() {
            return Err(SummaryError::EmptyResponse);
        }

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let result = HttpSummarizer::new("ftp://example.com", None);
        assert!(matches!(result, Err(SummaryError::Configuration(_))));
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let summarizer = HttpSummarizer::new("http://localhost:9999", Some(String::new())).unwrap();
        assert!(summarizer.api_key.is_none());
    }
}
