//! Request ids and the per-request generation audit line.
//!
//! Generation handlers attach a [`GenerationAudit`] to their response. The
//! middleware lifts it out, exposes the source family in `x-content-source`
//! and logs one `gateway_http_request` event carrying route, status, operation
//! and source tag, so HTTP metrics and the pipeline audit trail line up.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use shared::llm::GenerationOperation;
use shared::pipeline::SourceTag;
use tracing::{info, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
const CONTENT_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-content-source");
const MAX_CLIENT_REQUEST_ID_LEN: usize = 64;

#[derive(Clone, Debug)]
pub(super) struct RequestContext {
    pub(super) request_id: String,
}

/// Which generation path produced a response. `source` is `None` when the
/// request failed before or instead of producing content.
#[derive(Clone, Debug)]
pub(super) struct GenerationAudit {
    pub(super) operation: GenerationOperation,
    pub(super) source: Option<SourceTag>,
}

impl GenerationAudit {
    pub(super) fn new(operation: GenerationOperation, source: Option<SourceTag>) -> Self {
        Self { operation, source }
    }

    pub(super) fn attach(self, mut response: Response) -> Response {
        response.extensions_mut().insert(self);
        response
    }
}

pub(super) async fn generation_audit_middleware(mut req: Request, next: Next) -> Response {
    let request_id = request_id_from_headers(req.headers());
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let started_at = Instant::now();

    let mut response = next.run(req).await;
    let audit = response.extensions_mut().remove::<GenerationAudit>();
    let (operation, source) = audit_fields(audit.as_ref());

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    if let Some(source_tag) = audit.as_ref().and_then(|audit| audit.source.as_ref()) {
        headers.insert(
            CONTENT_SOURCE_HEADER,
            HeaderValue::from_static(source_tag.kind()),
        );
    }

    let status = response.status().as_u16();
    let latency_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
    if response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status,
            latency_ms,
            operation,
            source = %source,
            metric_name = "gateway_http_request",
            "generation request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status,
            latency_ms,
            operation,
            source = %source,
            metric_name = "gateway_http_request",
            "generation request served"
        );
    }

    response
}

fn audit_fields(audit: Option<&GenerationAudit>) -> (&'static str, String) {
    match audit {
        Some(audit) => (
            audit.operation.as_str(),
            audit
                .source
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string),
        ),
        None => ("none", "none".to_string()),
    }
}

/// Reuses a client-supplied id when it is short and made of `[A-Za-z0-9._-]`,
/// otherwise mints a UUID.
fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|candidate| is_acceptable_client_id(candidate))
        .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string)
}

fn is_acceptable_client_id(candidate: &str) -> bool {
    (1..=MAX_CLIENT_REQUEST_ID_LEN).contains(&candidate.len())
        && candidate
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.'))
}
