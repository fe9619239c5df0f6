use std::collections::VecDeque;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::credential::ProviderKind;
use shared::llm::{
    ChatCompletionsGateway, ChatCompletionsGatewayConfig, ChatModelRoute, GenerationOperation,
    LlmGateway, LlmGatewayError, LlmGatewayRequest, free_text_prompt, template_for_operation,
};
use tokio::net::TcpListener;
use tokio::sync::{Mutex, oneshot};

#[derive(Debug, Clone)]
struct MockReply {
    status: StatusCode,
    body: Value,
}

#[derive(Debug, Clone)]
struct TestServerState {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    seen_models: Arc<Mutex<Vec<String>>>,
    seen_auth_headers: Arc<Mutex<Vec<String>>>,
    seen_bodies: Arc<Mutex<Vec<Value>>>,
}

impl TestServerState {
    fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            seen_models: Arc::new(Mutex::new(Vec::new())),
            seen_auth_headers: Arc::new(Mutex::new(Vec::new())),
            seen_bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[tokio::test]
async fn uses_primary_model_and_returns_raw_text() {
    let state = TestServerState::with_replies(vec![MockReply {
        status: StatusCode::OK,
        body: success_response_body("provider-model", json!(article_text())),
    }]);
    let (url, shutdown_tx, server_task) = spawn_test_server(state.clone()).await;

    let gateway = ChatCompletionsGateway::new(config_for(url, 1, 0)).expect("gateway should build");
    let response = gateway
        .generate(free_text_request())
        .await
        .expect("primary response should succeed");

    shutdown_tx.send(()).expect("shutdown signal should send");
    server_task.await.expect("server task should join");

    assert_eq!(gateway.provider_name(), "openrouter");
    assert_eq!(response.model, "provider-model");
    assert_eq!(response.provider_request_id.as_deref(), Some("req-success"));
    assert_eq!(response.content, article_text());
    assert_eq!(response.usage.map(|usage| usage.total_tokens), Some(20));

    let seen_models = state.seen_models.lock().await.clone();
    assert_eq!(seen_models, vec!["primary-model".to_string()]);

    let seen_auth_headers = state.seen_auth_headers.lock().await.clone();
    assert_eq!(seen_auth_headers, vec![format!("Bearer {}", test_api_key())]);

    let seen_bodies = state.seen_bodies.lock().await.clone();
    assert!(seen_bodies[0].get("response_format").is_none());
    assert!(
        seen_bodies[0]["messages"][1]["content"]
            .as_str()
            .expect("user prompt should be a string")
            .contains("Topic: yapay zeka")
    );
}

#[tokio::test]
async fn requests_json_object_format_for_cv_operation() {
    let state = TestServerState::with_replies(vec![MockReply {
        status: StatusCode::OK,
        body: success_response_body("provider-model", json!("{\"fullName\":\"x\"}")),
    }]);
    let (url, shutdown_tx, server_task) = spawn_test_server(state.clone()).await;

    let gateway = ChatCompletionsGateway::new(config_for(url, 0, 0)).expect("gateway should build");
    gateway
        .generate(LlmGatewayRequest::from_template(
            template_for_operation(GenerationOperation::CvDocument),
            "backend engineer".to_string(),
        ))
        .await
        .expect("cv request should succeed");

    shutdown_tx.send(()).expect("shutdown signal should send");
    server_task.await.expect("server task should join");

    let seen_bodies = state.seen_bodies.lock().await.clone();
    assert_eq!(seen_bodies[0]["response_format"]["type"], "json_object");
}

#[tokio::test]
async fn retries_transient_failures_before_succeeding() {
    let state = TestServerState::with_replies(vec![
        provider_error_reply(StatusCode::SERVICE_UNAVAILABLE, "overloaded"),
        provider_error_reply(StatusCode::BAD_GATEWAY, "upstream_gateway"),
        MockReply {
            status: StatusCode::OK,
            body: success_response_body("provider-model", json!(article_text())),
        },
    ]);
    let (url, shutdown_tx, server_task) = spawn_test_server(state.clone()).await;

    let gateway = ChatCompletionsGateway::new(config_for(url, 2, 0)).expect("gateway should build");
    let response = gateway
        .generate(free_text_request())
        .await
        .expect("request should succeed after retries");

    shutdown_tx.send(()).expect("shutdown signal should send");
    server_task.await.expect("server task should join");

    assert_eq!(response.content, article_text());
    let seen_models = state.seen_models.lock().await.clone();
    assert_eq!(
        seen_models,
        vec![
            "primary-model".to_string(),
            "primary-model".to_string(),
            "primary-model".to_string()
        ]
    );
}

#[tokio::test]
async fn falls_back_to_secondary_model_after_primary_retries_exhausted() {
    let state = TestServerState::with_replies(vec![
        provider_error_reply(StatusCode::SERVICE_UNAVAILABLE, "capacity"),
        provider_error_reply(StatusCode::SERVICE_UNAVAILABLE, "capacity"),
        MockReply {
            status: StatusCode::OK,
            body: success_response_body("fallback-provider-model", json!(article_text())),
        },
    ]);
    let (url, shutdown_tx, server_task) = spawn_test_server(state.clone()).await;

    let gateway = ChatCompletionsGateway::new(config_for(url, 1, 0)).expect("gateway should build");
    let response = gateway
        .generate(free_text_request())
        .await
        .expect("fallback model should recover request");

    shutdown_tx.send(()).expect("shutdown signal should send");
    server_task.await.expect("server task should join");

    assert_eq!(response.model, "fallback-provider-model");
    let seen_models = state.seen_models.lock().await.clone();
    assert_eq!(
        seen_models,
        vec![
            "primary-model".to_string(),
            "primary-model".to_string(),
            "fallback-model".to_string()
        ]
    );
}

#[tokio::test]
async fn does_not_try_secondary_model_on_unauthorized_error() {
    let state = TestServerState::with_replies(vec![provider_error_reply(
        StatusCode::UNAUTHORIZED,
        "invalid_api_key",
    )]);
    let (url, shutdown_tx, server_task) = spawn_test_server(state.clone()).await;

    let gateway = ChatCompletionsGateway::new(config_for(url, 1, 0)).expect("gateway should build");
    let err = gateway
        .generate(free_text_request())
        .await
        .expect_err("unauthorized errors should fail immediately");

    shutdown_tx.send(()).expect("shutdown signal should send");
    server_task.await.expect("server task should join");

    assert!(
        matches!(err, LlmGatewayError::ProviderFailure(ref message) if message.contains("status=401")),
        "expected structured unauthorized provider error, got {err:?}"
    );

    let seen_models = state.seen_models.lock().await.clone();
    assert_eq!(seen_models, vec!["primary-model".to_string()]);
}

#[tokio::test]
async fn blank_content_is_reported_as_empty_response() {
    let state = TestServerState::with_replies(vec![
        MockReply {
            status: StatusCode::OK,
            body: success_response_body("primary-model", json!("   ")),
        },
        MockReply {
            status: StatusCode::OK,
            body: success_response_body("fallback-model", Value::Null),
        },
    ]);
    let (url, shutdown_tx, server_task) = spawn_test_server(state.clone()).await;

    let gateway = ChatCompletionsGateway::new(config_for(url, 0, 0)).expect("gateway should build");
    let err = gateway
        .generate(free_text_request())
        .await
        .expect_err("blank content should fail");

    shutdown_tx.send(()).expect("shutdown signal should send");
    server_task.await.expect("server task should join");

    assert!(matches!(err, LlmGatewayError::EmptyResponse), "got {err:?}");
    let seen_models = state.seen_models.lock().await.clone();
    assert_eq!(
        seen_models,
        vec!["primary-model".to_string(), "fallback-model".to_string()]
    );
}

#[tokio::test]
async fn unreachable_provider_is_a_provider_failure() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener address should resolve");
    drop(listener);

    let gateway = ChatCompletionsGateway::new(config_for(
        format!("http://{addr}/chat/completions"),
        0,
        0,
    ))
    .expect("gateway should build");
    let err = gateway
        .generate(free_text_request())
        .await
        .expect_err("closed port should fail");

    assert!(
        matches!(err, LlmGatewayError::ProviderFailure(ref message) if message == "request_unavailable"),
        "got {err:?}"
    );
}

fn free_text_request() -> LlmGatewayRequest {
    LlmGatewayRequest::from_template(
        template_for_operation(GenerationOperation::FreeText),
        free_text_prompt("yapay zeka", "tr"),
    )
}

fn test_api_key() -> String {
    format!("sk-or-v1-{}", "t".repeat(40))
}

fn config_for(
    chat_completions_url: String,
    max_retries: u32,
    retry_base_backoff_ms: u64,
) -> ChatCompletionsGatewayConfig {
    ChatCompletionsGatewayConfig {
        provider: ProviderKind::OpenRouter,
        chat_completions_url,
        api_key: test_api_key(),
        request_timeout_ms: 5_000,
        max_retries,
        retry_base_backoff_ms,
        model_route: ChatModelRoute {
            primary_model: "primary-model".to_string(),
            fallback_model: Some("fallback-model".to_string()),
        },
    }
}

fn article_text() -> &'static str {
    "# Yapay Zeka\n\nYapay zeka, makinelerin öğrenmesini ve karar vermesini sağlayan bir alandır."
}

fn success_response_body(model: &str, content: Value) -> Value {
    json!({
        "id": "req-success",
        "model": model,
        "choices": [
            {
                "message": {
                    "content": content
                }
            }
        ],
        "usage": {
            "prompt_tokens": 12,
            "completion_tokens": 8,
            "total_tokens": 20
        }
    })
}

fn provider_error_reply(status: StatusCode, code: &str) -> MockReply {
    MockReply {
        status,
        body: json!({
            "error": {
                "code": code
            }
        }),
    }
}

async fn spawn_test_server(
    state: TestServerState,
) -> (String, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/chat/completions", post(test_chat_completions_handler))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let local_addr = listener
        .local_addr()
        .expect("listener address should resolve");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_task = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });

        server.await.expect("test server should run");
    });

    (
        format!("http://{local_addr}/chat/completions"),
        shutdown_tx,
        server_task,
    )
}

async fn test_chat_completions_handler(
    State(state): State<TestServerState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(model) = payload.get("model").and_then(Value::as_str) {
        state.seen_models.lock().await.push(model.to_string());
    }

    if let Some(value) = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
    {
        state.seen_auth_headers.lock().await.push(value.to_string());
    }
    state.seen_bodies.lock().await.push(payload);

    let reply = state.replies.lock().await.pop_front().unwrap_or(MockReply {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({
            "error": {
                "code": "exhausted_test_replies"
            }
        }),
    });

    (reply.status, Json(reply.body))
}
