pub mod session;

use crate::models::{ErrorResponse, SummarizeResponse};

pub const EMPTY_TEXT: &str = "Please enter some text to summarize";
pub const SUMMARIZE_FAILED: &str = "Failed to summarize text";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the `/api/summarize` endpoint.
#[derive(Debug, Clone)]
pub struct SummarizeClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SummarizeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/summarize", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One request, no retries. Blank text is rejected locally.
    pub async fn summarize(
        &self,
        text: &str,
        temperature: f64,
    ) -> Result<SummarizeResponse, ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::Validation(EMPTY_TEXT.into()));
        }

        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "article": text,
                "temperature": temperature,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| SUMMARIZE_FAILED.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
