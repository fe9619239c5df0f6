#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use api_server::http::{AppState, build_router};
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use shared::config::PipelineTimeouts;
use shared::credential::{Credential, ProviderKind};
use shared::llm::{
    LlmGateway, LlmGatewayError, LlmGatewayFuture, LlmGatewayRequest, LlmGatewayResponse,
};
use shared::pipeline::GenerationPipeline;
use tower::ServiceExt;

pub enum MockReply {
    Content(String),
    Failure(&'static str),
    Hang,
}

pub struct MockGateway {
    reply: MockReply,
    calls: AtomicUsize,
}

impl MockGateway {
    pub fn new(reply: MockReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmGateway for MockGateway {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn generate<'a>(&'a self, _request: LlmGatewayRequest) -> LlmGatewayFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                MockReply::Content(content) => Ok(LlmGatewayResponse {
                    model: "mock-model".to_string(),
                    provider_request_id: None,
                    content: content.clone(),
                    usage: None,
                }),
                MockReply::Failure(message) => {
                    Err(LlmGatewayError::ProviderFailure(message.to_string()))
                }
                MockReply::Hang => {
                    std::future::pending::<()>().await;
                    Err(LlmGatewayError::Timeout)
                }
            }
        })
    }
}

pub fn valid_credential() -> Credential {
    Credential::new(
        ProviderKind::OpenRouter,
        format!("sk-or-v1-{}", "a".repeat(40)),
    )
}

pub fn build_test_router(gateway: Arc<MockGateway>, credential: Option<Credential>) -> axum::Router {
    build_test_router_with_timeouts(
        gateway,
        credential,
        PipelineTimeouts {
            generate_ms: 200,
            analyze_ms: 200,
            cv_ms: 200,
        },
    )
}

pub fn build_test_router_with_timeouts(
    gateway: Arc<MockGateway>,
    credential: Option<Credential>,
    timeouts: PipelineTimeouts,
) -> axum::Router {
    let pipeline = GenerationPipeline::new(gateway, credential, timeouts, 50);
    build_router(AppState {
        pipeline: Arc::new(pipeline),
    })
}

pub struct JsonResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub content_source: Option<String>,
    pub body: Value,
}

pub async fn send_json(app: &axum::Router, request: Request<Body>) -> JsonResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let header_text = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    };
    let request_id = header_text("x-request-id");
    let content_source = header_text("x-content-source");
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should read");
    let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| json!({}));

    JsonResponse {
        status,
        request_id,
        content_source,
        body,
    }
}

pub fn request(method: Method, uri: &str, json_body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    match json_body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}

pub fn raw_json_request(uri: &str, raw_body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw_body))
        .expect("request should build")
}

pub fn error_code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}

pub fn error_message(body: &Value) -> Option<&str> {
    body.get("error").and_then(Value::as_str)
}
