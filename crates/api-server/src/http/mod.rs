use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::pipeline::GenerationPipeline;

mod analyze;
mod cv;
mod errors;
mod generate;
mod health;
mod observability;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<GenerationPipeline>,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/v1/generate", post(generate::generate_content))
        .route("/v1/analyze", post(analyze::analyze_code))
        .route("/v1/cv", post(cv::generate_cv))
        .layer(middleware::from_fn(
            observability::generation_audit_middleware,
        ))
        .with_state(app_state)
}
