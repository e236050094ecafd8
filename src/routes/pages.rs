use crate::error::AppError;
use crate::models::DEFAULT_TEMPERATURE;
use crate::pipeline::{cost, ingest, summarize};
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut ctx = tera::Context::new();
    ctx.insert("model", summarize::MODEL);
    ctx.insert("provider_ready", &state.provider.is_ready());
    ctx.insert("default_temperature", &DEFAULT_TEMPERATURE);
    ctx.insert("input_rate", &cost::INPUT_COST_PER_1K_TOKENS);
    ctx.insert("output_rate", &cost::OUTPUT_COST_PER_1K_TOKENS);
    ctx.insert("prompt_overhead", &cost::PROMPT_OVERHEAD_TOKENS);
    ctx.insert("max_output_tokens", &cost::MAX_OUTPUT_TOKENS);
    ctx.insert("max_file_bytes", &ingest::MAX_FILE_BYTES);
    let html = state.tera.render("home.html", &ctx)?;
    Ok(Html(html))
}
