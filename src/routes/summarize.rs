use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::Instrument;

use crate::error::AppError;
use crate::models::{SummarizeRequest, SummarizeResponse};
use crate::pipeline::summarize::{self, SummarizeInput, ARTICLE_REQUIRED};
use crate::state::AppState;

/// POST /api/summarize — one article in, one summary out
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable summarize body");
        AppError::BadRequest(ARTICLE_REQUIRED.into())
    })?;

    let input = SummarizeInput::try_from(req)?;
    let client = state.provider.client()?;

    let span = tracing::info_span!(
        "summarize",
        request_id = %uuid::Uuid::new_v4(),
        chars = input.article.chars().count(),
        temperature = input.temperature,
    );

    let response = summarize::summarize(client, &input).instrument(span).await?;
    Ok(Json(response))
}
