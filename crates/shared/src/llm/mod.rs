pub mod chat_completions;
pub mod deadline;
pub mod gateway;
pub mod observability;
pub mod prompts;

pub use chat_completions::{
    ChatCompletionsConfigError, ChatCompletionsGateway, ChatCompletionsGatewayConfig,
    ChatModelRoute,
};
pub use deadline::{DeadlineElapsed, race_deadline};
pub use gateway::{
    GenerationOperation, LlmGateway, LlmGatewayError, LlmGatewayFuture, LlmGatewayRequest,
    LlmGatewayResponse, LlmTokenUsage, ResponseFormat,
};
pub use observability::{
    GenerationOutcome, GenerationTelemetry, error_type, log_generation_telemetry,
};
pub use prompts::{
    PromptTemplate, code_analysis_prompt, cv_prompt, free_text_prompt, template_for_operation,
};
