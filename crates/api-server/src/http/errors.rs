use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::ErrorResponse;
use shared::pipeline::{CvGenerationError, InputValidationError};
use tracing::{error, warn};

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
        }),
    )
        .into_response()
}

pub(super) fn bad_request_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, code, message)
}

pub(super) fn bad_gateway_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::BAD_GATEWAY, code, message)
}

pub(super) fn service_unavailable_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::SERVICE_UNAVAILABLE, code, message)
}

pub(super) fn internal_error_response(code: &str, message: &str) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, code, message)
}

pub(super) fn json_rejection_response(rejection: &JsonRejection) -> Response {
    warn!(status = rejection.status().as_u16(), "rejected request body: {rejection}");
    bad_request_response("invalid_json", "Request body must be a JSON object")
}

pub(super) fn input_validation_response(err: &InputValidationError) -> Response {
    bad_request_response(err.code(), &err.to_string())
}

pub(super) fn cv_error_response(err: CvGenerationError, request_id: &str) -> Response {
    match err {
        CvGenerationError::ProviderUnavailable => service_unavailable_response(
            "provider_unavailable",
            "Content provider is not configured",
        ),
        CvGenerationError::Provider(message) => {
            warn!(request_id = %request_id, "cv provider call failed: {message}");
            bad_gateway_response("provider_error", "Content provider request failed")
        }
        CvGenerationError::InvalidOutput(err) => {
            error!(request_id = %request_id, "cv output rejected: {err}");
            internal_error_response("cv_generation_failed", "CV could not be generated")
        }
    }
}
