use std::time::Duration;

use tracing::{info, warn};

use super::gateway::{GenerationOperation, LlmGatewayError, LlmGatewayResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    Succeeded,
    FellBack,
    Failed,
}

impl GenerationOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "success",
            Self::FellBack => "fallback",
            Self::Failed => "failure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationTelemetry {
    pub operation: &'static str,
    pub outcome: GenerationOutcome,
    pub source: String,
    pub latency_ms: u64,
    pub provider: String,
    pub model: Option<String>,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
    pub error_type: Option<&'static str>,
}

impl GenerationTelemetry {
    pub fn new(
        operation: GenerationOperation,
        provider: &str,
        latency: Duration,
        outcome: GenerationOutcome,
        source: String,
    ) -> Self {
        Self {
            operation: operation.as_str(),
            outcome,
            source,
            latency_ms: duration_to_millis(latency),
            provider: provider.to_string(),
            model: None,
            prompt_tokens: None,
            completion_tokens: None,
            total_tokens: None,
            error_type: None,
        }
    }

    pub fn with_response(mut self, response: &LlmGatewayResponse) -> Self {
        self.model = Some(response.model.clone());
        if let Some(usage) = &response.usage {
            self.prompt_tokens = Some(usage.prompt_tokens);
            self.completion_tokens = Some(usage.completion_tokens);
            self.total_tokens = Some(usage.total_tokens);
        }
        self
    }

    pub fn with_error_type(mut self, error_type: &'static str) -> Self {
        self.error_type = Some(error_type);
        self
    }
}

pub fn log_generation_telemetry(event: &GenerationTelemetry) {
    match event.outcome {
        GenerationOutcome::Succeeded => info!(
            metric_name = "content_generation",
            operation = event.operation,
            outcome = event.outcome.as_str(),
            source = %event.source,
            latency_ms = event.latency_ms,
            provider = %event.provider,
            model = event.model.as_deref().unwrap_or("unknown"),
            prompt_tokens = event.prompt_tokens.unwrap_or(0),
            completion_tokens = event.completion_tokens.unwrap_or(0),
            total_tokens = event.total_tokens.unwrap_or(0),
            "content generation completed"
        ),
        GenerationOutcome::FellBack | GenerationOutcome::Failed => warn!(
            metric_name = "content_generation",
            operation = event.operation,
            outcome = event.outcome.as_str(),
            source = %event.source,
            latency_ms = event.latency_ms,
            provider = %event.provider,
            model = event.model.as_deref().unwrap_or("unknown"),
            error_type = event.error_type.unwrap_or("none"),
            "content generation did not use provider output"
        ),
    }
}

pub fn error_type(error: &LlmGatewayError) -> &'static str {
    match error {
        LlmGatewayError::Timeout => "timeout",
        LlmGatewayError::ProviderFailure(_) => "provider_failure",
        LlmGatewayError::InvalidProviderPayload(_) => "invalid_provider_payload",
        LlmGatewayError::EmptyResponse => "empty_response",
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
