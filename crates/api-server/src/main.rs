use std::net::SocketAddr;
use std::sync::Arc;

use api_server::http::{AppState, build_router};
use shared::config::{GatewayConfig, load_dotenv};
use shared::llm::{ChatCompletionsGateway, ChatCompletionsGatewayConfig};
use shared::pipeline::GenerationPipeline;
use tokio::signal;
use tracing::{error, info, warn};

const DEFAULT_LOG_FILTER: &str = "api_server=info,shared=info,axum=info";

#[tokio::main]
async fn main() {
    let dotenv_result = load_dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        )
        .init();

    if let Err(err) = dotenv_result {
        error!("failed to load environment: {err}");
        std::process::exit(1);
    }

    let config = match GatewayConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("failed to read config: {err}");
            std::process::exit(1);
        }
    };

    // Transport ceiling; per-operation deadlines are enforced by the pipeline.
    let request_timeout_ms = config
        .timeouts
        .generate_ms
        .max(config.timeouts.analyze_ms)
        .max(config.timeouts.cv_ms);
    let gateway = match ChatCompletionsGateway::new(
        ChatCompletionsGatewayConfig::from_provider_config(&config.provider, request_timeout_ms),
    ) {
        Ok(gateway) => gateway,
        Err(err) => {
            error!("failed to build provider client: {err}");
            std::process::exit(1);
        }
    };

    if config.provider.credential.is_none() {
        warn!(
            provider = %config.provider.kind,
            "LLM_PROVIDER_API_KEY is not set; all requests will use fallback content"
        );
    }

    let pipeline = GenerationPipeline::from_config(&config, Arc::new(gateway));
    let app = build_router(AppState {
        pipeline: Arc::new(pipeline),
    });

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!(bind_addr = %config.bind_addr, "invalid GATEWAY_BIND_ADDR: {err}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!(
        provider = %config.provider.kind,
        primary_model = %config.provider.primary_model,
        "content gateway listening on {}",
        listener.local_addr().unwrap_or(addr)
    );

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to listen for shutdown signal: {err}");
        }
        info!("content gateway shutting down");
    });

    if let Err(err) = server.await {
        error!("server terminated with error: {err}");
        std::process::exit(1);
    }
}
