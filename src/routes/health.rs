use crate::models::HealthResponse;
use crate::pipeline::summarize::MODEL;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        provider_configured: state.provider.is_ready(),
        model: MODEL.into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
