//! Request orchestration: credential check, deadline-bounded provider call,
//! output checks and deterministic fallback.
//!
//! Generate and Analyze always produce a result; the [`SourceTag`] records
//! which path was taken. CV generation is the exception and fails outright
//! when the provider path cannot produce a schema-valid document.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{GatewayConfig, PipelineTimeouts};
use crate::content::{
    AnalysisCategoryResult, CvDocument, CvValidationError, cv_output_schema,
    heuristic_category_results, parse_category_sections, parse_cv_output,
    select_fallback_content,
};
use crate::credential::{Credential, credential_is_usable};
use crate::llm::{
    GenerationOperation, GenerationOutcome, GenerationTelemetry, LlmGateway, LlmGatewayRequest,
    LlmGatewayResponse, code_analysis_prompt, cv_prompt, error_type, free_text_prompt,
    log_generation_telemetry, race_deadline, template_for_operation,
};

mod requests;
mod source;

pub use requests::{
    DEFAULT_CONTENT_LANGUAGE, InputValidationError, ValidatedAnalyzeRequest, ValidatedCvRequest,
    ValidatedGenerateRequest,
};
pub use source::SourceTag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub content: String,
    pub source: SourceTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub results: Vec<AnalysisCategoryResult>,
    pub source: SourceTag,
}

#[derive(Debug, Error)]
pub enum CvGenerationError {
    #[error("provider credential is missing or invalid")]
    ProviderUnavailable,
    #[error("cv provider call failed: {0}")]
    Provider(String),
    #[error(transparent)]
    InvalidOutput(#[from] CvValidationError),
}

/// Why the provider path was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FallbackReason {
    InvalidCredential,
    ProviderError {
        message: String,
        error_type: &'static str,
    },
    ShortContent,
}

impl FallbackReason {
    fn content_tag(&self) -> SourceTag {
        match self {
            Self::InvalidCredential => SourceTag::FallbackInvalidKey,
            Self::ProviderError { message, .. } => SourceTag::FallbackError(message.clone()),
            Self::ShortContent => SourceTag::FallbackShortContent,
        }
    }

    fn analysis_tag(&self) -> SourceTag {
        match self {
            Self::InvalidCredential => SourceTag::Simulation,
            Self::ProviderError { .. } | Self::ShortContent => SourceTag::SimulationFallback,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid_credential",
            Self::ProviderError { error_type, .. } => *error_type,
            Self::ShortContent => "short_content",
        }
    }
}

enum ProviderOutcome {
    Succeeded(LlmGatewayResponse),
    Failed(FallbackReason),
}

#[derive(Clone)]
pub struct GenerationPipeline {
    gateway: Arc<dyn LlmGateway>,
    credential: Option<Credential>,
    timeouts: PipelineTimeouts,
    min_content_length: usize,
}

impl GenerationPipeline {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        credential: Option<Credential>,
        timeouts: PipelineTimeouts,
        min_content_length: usize,
    ) -> Self {
        Self {
            gateway,
            credential,
            timeouts,
            min_content_length,
        }
    }

    pub fn from_config(config: &GatewayConfig, gateway: Arc<dyn LlmGateway>) -> Self {
        Self::new(
            gateway,
            config.provider.credential.clone(),
            config.timeouts,
            config.min_content_length,
        )
    }

    pub fn min_content_length(&self) -> usize {
        self.min_content_length
    }

    pub async fn generate(&self, request: &ValidatedGenerateRequest) -> GenerationResult {
        let started_at = Instant::now();
        let operation = GenerationOperation::FreeText;

        let outcome = self
            .call_provider(
                operation,
                free_text_prompt(&request.prompt, &request.language),
                Duration::from_millis(self.timeouts.generate_ms),
            )
            .await;
        let outcome = self.enforce_min_length(outcome);

        let result = match &outcome {
            ProviderOutcome::Succeeded(response) => GenerationResult {
                content: response.content.trim().to_string(),
                source: self.provider_tag(),
            },
            ProviderOutcome::Failed(reason) => GenerationResult {
                content: select_fallback_content(&request.prompt).to_string(),
                source: reason.content_tag(),
            },
        };

        self.record(operation, started_at, &outcome, &result.source);
        result
    }

    pub async fn analyze(&self, request: &ValidatedAnalyzeRequest) -> AnalysisResult {
        let started_at = Instant::now();
        let operation = GenerationOperation::CodeAnalysis;

        let outcome = self
            .call_provider(
                operation,
                code_analysis_prompt(&request.code, &request.language, &request.categories),
                Duration::from_millis(self.timeouts.analyze_ms),
            )
            .await;
        let outcome = self.enforce_min_length(outcome);

        let result = match &outcome {
            ProviderOutcome::Succeeded(response) => AnalysisResult {
                results: parse_category_sections(&response.content, &request.categories),
                source: self.provider_tag(),
            },
            ProviderOutcome::Failed(reason) => AnalysisResult {
                results: heuristic_category_results(
                    &request.code,
                    &request.language,
                    &request.categories,
                ),
                source: reason.analysis_tag(),
            },
        };

        self.record(operation, started_at, &outcome, &result.source);
        result
    }

    pub async fn generate_cv(
        &self,
        request: &ValidatedCvRequest,
    ) -> Result<CvDocument, CvGenerationError> {
        let started_at = Instant::now();
        let operation = GenerationOperation::CvDocument;

        let outcome = self
            .call_provider(
                operation,
                cv_prompt(&request.prompt, &cv_output_schema()),
                Duration::from_millis(self.timeouts.cv_ms),
            )
            .await;

        match outcome {
            ProviderOutcome::Succeeded(response) => {
                let parsed = parse_cv_output(&response.content);
                let telemetry = GenerationTelemetry::new(
                    operation,
                    self.gateway.provider_name(),
                    started_at.elapsed(),
                    if parsed.is_ok() {
                        GenerationOutcome::Succeeded
                    } else {
                        GenerationOutcome::Failed
                    },
                    self.provider_tag().to_string(),
                )
                .with_response(&response);
                let telemetry = if parsed.is_ok() {
                    telemetry
                } else {
                    telemetry.with_error_type("invalid_cv_output")
                };
                log_generation_telemetry(&telemetry);
                parsed.map_err(CvGenerationError::from)
            }
            ProviderOutcome::Failed(reason) => {
                log_generation_telemetry(
                    &GenerationTelemetry::new(
                        operation,
                        self.gateway.provider_name(),
                        started_at.elapsed(),
                        GenerationOutcome::Failed,
                        "none".to_string(),
                    )
                    .with_error_type(reason.error_type()),
                );
                Err(match reason {
                    FallbackReason::InvalidCredential => CvGenerationError::ProviderUnavailable,
                    FallbackReason::ProviderError { message, .. } => {
                        CvGenerationError::Provider(message)
                    }
                    FallbackReason::ShortContent => {
                        CvGenerationError::Provider("short_content".to_string())
                    }
                })
            }
        }
    }

    async fn call_provider(
        &self,
        operation: GenerationOperation,
        user_prompt: String,
        deadline: Duration,
    ) -> ProviderOutcome {
        if !credential_is_usable(self.credential.as_ref()) {
            debug!(
                operation = operation.as_str(),
                "provider credential missing or malformed; skipping provider call"
            );
            return ProviderOutcome::Failed(FallbackReason::InvalidCredential);
        }

        let request =
            LlmGatewayRequest::from_template(template_for_operation(operation), user_prompt);

        match race_deadline(deadline, self.gateway.generate(request)).await {
            Ok(Ok(response)) => ProviderOutcome::Succeeded(response),
            Ok(Err(err)) => {
                warn!(operation = operation.as_str(), "provider request failed: {err}");
                ProviderOutcome::Failed(FallbackReason::ProviderError {
                    message: err.to_string(),
                    error_type: error_type(&err),
                })
            }
            Err(elapsed) => {
                warn!(
                    operation = operation.as_str(),
                    deadline_ms = elapsed.deadline_ms,
                    "provider request exceeded deadline"
                );
                ProviderOutcome::Failed(FallbackReason::ProviderError {
                    message: elapsed.to_string(),
                    error_type: "deadline_elapsed",
                })
            }
        }
    }

    fn enforce_min_length(&self, outcome: ProviderOutcome) -> ProviderOutcome {
        match outcome {
            ProviderOutcome::Succeeded(response)
                if response.content.trim().chars().count() < self.min_content_length =>
            {
                ProviderOutcome::Failed(FallbackReason::ShortContent)
            }
            other => other,
        }
    }

    /// Tag recorded when the provider answered.
    pub fn provider_tag(&self) -> SourceTag {
        SourceTag::Provider(self.gateway.provider_name().to_string())
    }

    fn record(
        &self,
        operation: GenerationOperation,
        started_at: Instant,
        outcome: &ProviderOutcome,
        source: &SourceTag,
    ) {
        let telemetry = GenerationTelemetry::new(
            operation,
            self.gateway.provider_name(),
            started_at.elapsed(),
            match outcome {
                ProviderOutcome::Succeeded(_) => GenerationOutcome::Succeeded,
                ProviderOutcome::Failed(_) => GenerationOutcome::FellBack,
            },
            source.to_string(),
        );
        let telemetry = match outcome {
            ProviderOutcome::Succeeded(response) => telemetry.with_response(response),
            ProviderOutcome::Failed(reason) => telemetry.with_error_type(reason.error_type()),
        };
        log_generation_telemetry(&telemetry);
    }
}

#[cfg(test)]
mod tests {
    use super::{FallbackReason, SourceTag};

    #[test]
    fn fallback_reasons_map_to_variant_specific_tags() {
        let provider_error = FallbackReason::ProviderError {
            message: "llm provider request timed out".to_string(),
            error_type: "timeout",
        };
        assert_eq!(
            provider_error.content_tag(),
            SourceTag::FallbackError("llm provider request timed out".to_string())
        );
        assert_eq!(provider_error.analysis_tag(), SourceTag::SimulationFallback);
        assert_eq!(
            FallbackReason::InvalidCredential.analysis_tag(),
            SourceTag::Simulation
        );
        assert_eq!(
            FallbackReason::ShortContent.content_tag(),
            SourceTag::FallbackShortContent
        );
    }
}
