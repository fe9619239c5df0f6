use std::fmt;

const MIN_CREDENTIAL_LENGTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenRouter,
    OpenAi,
    Groq,
}

impl ProviderKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Some(Self::OpenRouter),
            "openai" => Some(Self::OpenAi),
            "groq" => Some(Self::Groq),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::OpenAi => "openai",
            Self::Groq => "groq",
        }
    }

    pub const fn credential_prefix(self) -> &'static str {
        match self {
            Self::OpenRouter => "sk-or-",
            Self::OpenAi => "sk-",
            Self::Groq => "gsk_",
        }
    }

    pub const fn default_chat_completions_url(self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            Self::OpenAi => "https://api.openai.com/v1/chat/completions",
            Self::Groq => "https://api.groq.com/openai/v1/chat/completions",
        }
    }

    pub const fn default_primary_model(self) -> &'static str {
        match self {
            Self::OpenRouter => "openai/gpt-4o-mini",
            Self::OpenAi => "gpt-4o-mini",
            Self::Groq => "llama-3.1-8b-instant",
        }
    }

    pub const fn default_fallback_model(self) -> Option<&'static str> {
        match self {
            Self::OpenRouter => Some("anthropic/claude-3.5-haiku"),
            Self::OpenAi | Self::Groq => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider secret read once from configuration. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    provider: ProviderKind,
    secret: String,
}

impl Credential {
    pub fn new(provider: ProviderKind, secret: impl Into<String>) -> Self {
        Self {
            provider,
            secret: secret.into(),
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn is_valid(&self) -> bool {
        is_valid_credential(self.provider, &self.secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("provider", &self.provider)
            .field("secret", &"[redacted]")
            .finish()
    }
}

pub fn is_valid_credential(provider: ProviderKind, secret: &str) -> bool {
    secret.chars().count() >= MIN_CREDENTIAL_LENGTH
        && secret.starts_with(provider.credential_prefix())
}

/// A missing credential is treated the same as a malformed one.
pub fn credential_is_usable(credential: Option<&Credential>) -> bool {
    credential.is_some_and(Credential::is_valid)
}
