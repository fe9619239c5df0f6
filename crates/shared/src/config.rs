use thiserror::Error;

use crate::config_env::{optional_trimmed_env, parse_u32_env, parse_u64_env, parse_usize_env};
use crate::content::shortest_template_len;
use crate::credential::{Credential, ProviderKind};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_RETRIES: u32 = 1;
const DEFAULT_RETRY_BASE_BACKOFF_MS: u64 = 250;
pub const DEFAULT_GENERATE_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_ANALYZE_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_CV_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load .env file: {0}")]
    Dotenv(String),
    #[error("invalid integer in env var {0}")]
    ParseInt(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Loads a `.env` file from the working directory when one exists.
pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTimeouts {
    pub generate_ms: u64,
    pub analyze_ms: u64,
    pub cv_ms: u64,
}

impl Default for PipelineTimeouts {
    fn default() -> Self {
        Self {
            generate_ms: DEFAULT_GENERATE_TIMEOUT_MS,
            analyze_ms: DEFAULT_ANALYZE_TIMEOUT_MS,
            cv_ms: DEFAULT_CV_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub credential: Option<Credential>,
    pub chat_completions_url: String,
    pub primary_model: String,
    pub fallback_model: Option<String>,
    pub max_retries: u32,
    pub retry_base_backoff_ms: u64,
}

impl ProviderConfig {
    pub fn for_kind(kind: ProviderKind, credential: Option<Credential>) -> Self {
        Self {
            kind,
            credential,
            chat_completions_url: kind.default_chat_completions_url().to_string(),
            primary_model: kind.default_primary_model().to_string(),
            fallback_model: kind.default_fallback_model().map(ToString::to_string),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_backoff_ms: DEFAULT_RETRY_BASE_BACKOFF_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub provider: ProviderConfig,
    pub timeouts: PipelineTimeouts,
    pub min_content_length: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let kind = match optional_trimmed_env("LLM_PROVIDER") {
            Some(raw) => ProviderKind::parse(&raw).ok_or_else(|| {
                ConfigError::InvalidConfiguration(format!(
                    "LLM_PROVIDER must be one of openrouter, openai, groq (got '{raw}')"
                ))
            })?,
            None => ProviderKind::OpenRouter,
        };

        let credential = optional_trimmed_env("LLM_PROVIDER_API_KEY")
            .map(|secret| Credential::new(kind, secret));

        let mut provider = ProviderConfig::for_kind(kind, credential);
        if let Some(url) = optional_trimmed_env("LLM_CHAT_COMPLETIONS_URL") {
            provider.chat_completions_url = url;
        }
        if !provider.chat_completions_url.starts_with("http://")
            && !provider.chat_completions_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidConfiguration(
                "LLM_CHAT_COMPLETIONS_URL must start with http:// or https://".to_string(),
            ));
        }
        if let Some(model) = optional_trimmed_env("LLM_MODEL_PRIMARY") {
            provider.primary_model = model;
        }
        if let Some(model) = optional_trimmed_env("LLM_MODEL_FALLBACK") {
            provider.fallback_model = Some(model);
        }
        provider.max_retries = parse_u32_env("LLM_MAX_RETRIES", provider.max_retries)?;
        provider.retry_base_backoff_ms =
            parse_u64_env("LLM_RETRY_BASE_BACKOFF_MS", provider.retry_base_backoff_ms)?;

        let config = Self {
            bind_addr: optional_trimmed_env("GATEWAY_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            provider,
            timeouts: PipelineTimeouts {
                generate_ms: parse_u64_env("GENERATE_TIMEOUT_MS", DEFAULT_GENERATE_TIMEOUT_MS)?,
                analyze_ms: parse_u64_env("ANALYZE_TIMEOUT_MS", DEFAULT_ANALYZE_TIMEOUT_MS)?,
                cv_ms: parse_u64_env("CV_TIMEOUT_MS", DEFAULT_CV_TIMEOUT_MS)?,
            },
            min_content_length: parse_usize_env("MIN_CONTENT_LENGTH", DEFAULT_MIN_CONTENT_LENGTH)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeouts = [
            ("GENERATE_TIMEOUT_MS", self.timeouts.generate_ms),
            ("ANALYZE_TIMEOUT_MS", self.timeouts.analyze_ms),
            ("CV_TIMEOUT_MS", self.timeouts.cv_ms),
        ];
        for (key, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "{key} must be greater than 0"
                )));
            }
        }
        if self.min_content_length == 0 {
            return Err(ConfigError::InvalidConfiguration(
                "MIN_CONTENT_LENGTH must be greater than 0".to_string(),
            ));
        }
        let shortest_template = shortest_template_len();
        if self.min_content_length > shortest_template {
            return Err(ConfigError::InvalidConfiguration(format!(
                "MIN_CONTENT_LENGTH must not exceed {shortest_template}, the shortest fallback template"
            )));
        }
        if self.provider.primary_model.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "LLM_MODEL_PRIMARY must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayConfig, PipelineTimeouts, ProviderConfig};
    use crate::credential::ProviderKind;

    fn sample_config() -> GatewayConfig {
        GatewayConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            provider: ProviderConfig::for_kind(ProviderKind::OpenRouter, None),
            timeouts: PipelineTimeouts::default(),
            min_content_length: 50,
        }
    }

    #[test]
    fn default_timeouts_match_endpoint_budgets() {
        let timeouts = PipelineTimeouts::default();
        assert_eq!(timeouts.generate_ms, 20_000);
        assert_eq!(timeouts.analyze_ms, 30_000);
        assert_eq!(timeouts.cv_ms, 30_000);
    }

    #[test]
    fn validate_rejects_zero_timeouts_and_thresholds() {
        let mut config = sample_config();
        config.timeouts.analyze_ms = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.min_content_length = 0;
        assert!(config.validate().is_err());

        let mut config = sample_config();
        config.min_content_length = 100_000;
        assert!(config.validate().is_err());

        assert!(sample_config().validate().is_ok());
    }

    #[test]
    fn provider_defaults_follow_kind() {
        let config = ProviderConfig::for_kind(ProviderKind::Groq, None);
        assert!(config.chat_completions_url.starts_with("https://api.groq.com"));
        assert!(config.credential.is_none());
    }
}
