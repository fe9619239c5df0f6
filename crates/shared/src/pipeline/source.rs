use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Records which path produced a result. Serialized as a single string such as
/// `provider:openrouter` or `fallback_error:<message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTag {
    Provider(String),
    FallbackInvalidKey,
    FallbackError(String),
    FallbackShortContent,
    Simulation,
    SimulationFallback,
}

impl SourceTag {
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// Tag family without the provider name or error message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Provider(_) => "provider",
            Self::FallbackInvalidKey => "fallback_invalid_key",
            Self::FallbackError(_) => "fallback_error",
            Self::FallbackShortContent => "fallback_short_content",
            Self::Simulation => "simulation",
            Self::SimulationFallback => "simulation_fallback",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "fallback_invalid_key" => return Some(Self::FallbackInvalidKey),
            "fallback_short_content" => return Some(Self::FallbackShortContent),
            "simulation" => return Some(Self::Simulation),
            "simulation_fallback" => return Some(Self::SimulationFallback),
            _ => {}
        }

        if let Some(name) = raw.strip_prefix("provider:") {
            return Some(Self::Provider(name.to_string()));
        }
        raw.strip_prefix("fallback_error:")
            .map(|message| Self::FallbackError(message.to_string()))
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(name) => write!(f, "provider:{name}"),
            Self::FallbackInvalidKey => f.write_str("fallback_invalid_key"),
            Self::FallbackError(message) => write!(f, "fallback_error:{message}"),
            Self::FallbackShortContent => f.write_str("fallback_short_content"),
            Self::Simulation => f.write_str("simulation"),
            Self::SimulationFallback => f.write_str("simulation_fallback"),
        }
    }
}

impl Serialize for SourceTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SourceTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::custom(format!("unknown source tag '{raw}'")))
    }
}
