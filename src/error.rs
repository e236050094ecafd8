use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ErrorResponse;

pub const MISSING_API_KEY: &str =
    "OpenAI API key not configured. Please add OPENAI_API_KEY to your environment variables.";
pub const CLIENT_NOT_INITIALIZED: &str = "OpenAI client not initialized";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Missing or malformed caller input.
    #[error("{0}")]
    BadRequest(String),

    /// Credential absent or provider client unusable.
    #[error("{0}")]
    Configuration(String),

    /// Anything the completion provider call failed with.
    #[error("{0}")]
    Provider(String),
}

impl AppError {
    pub fn provider(err: &anyhow::Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            AppError::Provider(UNEXPECTED_ERROR.into())
        } else {
            AppError::Provider(message)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(%status, error = %self);
        } else {
            tracing::warn!(%status, error = %self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
