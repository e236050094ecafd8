pub mod estimate;
pub mod health;
pub mod ingest;
pub mod pages;
pub mod summarize;

#[cfg(test)]
mod tests;

use crate::middleware;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Room for a 5MB article sent as JSON. `/api/ingest` enforces its own limit.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) if o != "*" => Some(v),
            _ => {
                tracing::warn!("ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(false);

    // Upload route sizes its own body so oversized files get the 5MB message
    let upload_routes = Router::new()
        .route("/api/ingest", axum::routing::post(ingest::ingest))
        .layer(DefaultBodyLimit::disable());

    let limited_routes = Router::new()
        // Pages
        .route("/", axum::routing::get(pages::home))
        // API
        .route("/api/summarize", axum::routing::post(summarize::summarize))
        .route("/api/estimate", axum::routing::post(estimate::estimate))
        // Health
        .route("/health", axum::routing::get(health::health_check))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    Router::new()
        .merge(limited_routes)
        .merge(upload_routes)
        // Middleware layers (applied bottom-up)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware::security_headers::security_headers,
        ))
        .with_state(state)
}
