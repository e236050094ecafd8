use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;
use crate::models::{EstimateRequest, EstimateResponse};
use crate::pipeline::cost;

/// POST /api/estimate — token and cost estimate for an article, no provider call
pub async fn estimate(
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(Json(cost::estimate(&req.article).into()))
}
