use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::llm::GenerationOperation;
use shared::models::CvRequest;

use super::AppState;
use super::errors::{cv_error_response, input_validation_response, json_rejection_response};
use super::observability::{GenerationAudit, RequestContext};

pub(super) async fn generate_cv(
    State(state): State<AppState>,
    Extension(request_context): Extension<RequestContext>,
    payload: Result<Json<CvRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(&rejection),
    };
    let request = match req.validate() {
        Ok(request) => request,
        Err(err) => return input_validation_response(&err),
    };

    match state.pipeline.generate_cv(&request).await {
        Ok(document) => GenerationAudit::new(
            GenerationOperation::CvDocument,
            Some(state.pipeline.provider_tag()),
        )
        .attach((StatusCode::OK, Json(document)).into_response()),
        Err(err) => GenerationAudit::new(GenerationOperation::CvDocument, None)
            .attach(cv_error_response(err, &request_context.request_id)),
    }
}
