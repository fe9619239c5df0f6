use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::llm::GenerationOperation;
use shared::models::{GenerateRequest, GenerateResponse};

use super::AppState;
use super::errors::{input_validation_response, json_rejection_response};
use super::observability::GenerationAudit;

pub(super) async fn generate_content(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let request = match req.validate() {
        Ok(request) => request,
        Err(err) => return input_validation_response(&err),
    };

    let result = state.pipeline.generate(&request).await;
    let audit = GenerationAudit::new(GenerationOperation::FreeText, Some(result.source.clone()));

    audit.attach(
        (
            StatusCode::OK,
            Json(GenerateResponse {
                content: result.content,
                source: result.source,
            }),
        )
            .into_response(),
    )
}
