use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompts::PromptTemplate;

pub type LlmGatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<LlmGatewayResponse, LlmGatewayError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOperation {
    FreeText,
    CodeAnalysis,
    CvDocument,
}

impl GenerationOperation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FreeText => "free_text",
            Self::CodeAnalysis => "code_analysis",
            Self::CvDocument => "cv_document",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

#[derive(Debug, Clone)]
pub struct LlmGatewayRequest {
    pub operation: GenerationOperation,
    pub system_prompt: String,
    pub user_prompt: String,
    pub response_format: ResponseFormat,
    pub temperature: f32,
}

impl LlmGatewayRequest {
    pub fn from_template(template: PromptTemplate, user_prompt: String) -> Self {
        Self {
            operation: template.operation,
            system_prompt: template.system_prompt.to_string(),
            user_prompt,
            response_format: template.response_format,
            temperature: template.temperature,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmTokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmGatewayResponse {
    pub model: String,
    pub provider_request_id: Option<String>,
    pub content: String,
    pub usage: Option<LlmTokenUsage>,
}

#[derive(Debug, Error)]
pub enum LlmGatewayError {
    #[error("llm provider request timed out")]
    Timeout,
    #[error("llm provider request failed: {0}")]
    ProviderFailure(String),
    #[error("llm provider returned an invalid payload: {0}")]
    InvalidProviderPayload(String),
    #[error("llm provider returned an empty response")]
    EmptyResponse,
}

pub trait LlmGateway: Send + Sync {
    /// Provider name used in `provider:<name>` source tags.
    fn provider_name(&self) -> &str;

    fn generate<'a>(&'a self, request: LlmGatewayRequest) -> LlmGatewayFuture<'a>;
}
