use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::llm::GenerationOperation;
use shared::models::{AnalyzeRequest, AnalyzeResponse};

use super::AppState;
use super::errors::{input_validation_response, json_rejection_response};
use super::observability::GenerationAudit;

pub(super) async fn analyze_code(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let request = match req.validate() {
        Ok(request) => request,
        Err(err) => return input_validation_response(&err),
    };

    let result = state.pipeline.analyze(&request).await;
    let audit =
        GenerationAudit::new(GenerationOperation::CodeAnalysis, Some(result.source.clone()));

    audit.attach(
        (
            StatusCode::OK,
            Json(AnalyzeResponse {
                results: result.results,
                source: result.source,
            }),
        )
            .into_response(),
    )
}
