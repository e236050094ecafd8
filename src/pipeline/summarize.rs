use std::time::Instant;

use crate::error::AppError;
use crate::models::{SummarizeRequest, SummarizeResponse, DEFAULT_TEMPERATURE};
use crate::services::openai::OpenAiClient;

pub const MODEL: &str = "gpt-4o-mini";
pub const MAX_TOKENS: u32 = 500;
pub const NO_SUMMARY: &str = "No summary generated";
pub const ARTICLE_REQUIRED: &str = "Article text is required";
pub const TEMPERATURE_OUT_OF_RANGE: &str = "Temperature must be between 0 and 1";

/// A validated summarize call.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeInput {
    pub article: String,
    pub temperature: f64,
}

impl TryFrom<SummarizeRequest> for SummarizeInput {
    type Error = AppError;

    fn try_from(req: SummarizeRequest) -> Result<Self, Self::Error> {
        let article = match req.article {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s,
            _ => return Err(AppError::BadRequest(ARTICLE_REQUIRED.into())),
        };

        let temperature = match req.temperature {
            None | Some(serde_json::Value::Null) => DEFAULT_TEMPERATURE,
            Some(v) => v
                .as_f64()
                .filter(|t| (0.0..=1.0).contains(t))
                .ok_or_else(|| AppError::BadRequest(TEMPERATURE_OUT_OF_RANGE.into()))?,
        };

        Ok(SummarizeInput {
            article,
            temperature,
        })
    }
}

pub fn summary_prompt(article: &str) -> String {
    format!(
        "Summarize the following article in under 200 words, maintaining the key points and main ideas:\n\n{}\n\nSummary:",
        article
    )
}

pub async fn summarize(
    client: &OpenAiClient,
    input: &SummarizeInput,
) -> Result<SummarizeResponse, AppError> {
    let prompt = summary_prompt(&input.article);
    let started = Instant::now();

    let result = client
        .chat_completion(MODEL, &prompt, input.temperature, MAX_TOKENS)
        .await
        .map_err(|e| AppError::provider(&e))?;

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        prompt_tokens = result.usage.prompt_tokens,
        completion_tokens = result.usage.completion_tokens,
        "completion finished"
    );

    Ok(SummarizeResponse {
        summary: result.text.unwrap_or_else(|| NO_SUMMARY.to_string()),
        usage: result.usage,
    })
}
