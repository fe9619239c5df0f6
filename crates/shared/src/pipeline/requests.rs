use thiserror::Error;

use crate::content::AnalysisCategory;
use crate::models::{AnalyzeRequest, CvRequest, GenerateRequest};

pub const DEFAULT_CONTENT_LANGUAGE: &str = "tr";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputValidationError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("analysisCategories must contain at least one category")]
    EmptyCategories,
    #[error("unknown analysis category '{0}'")]
    UnknownCategory(String),
    #[error("analysis category '{0}' is listed more than once")]
    DuplicateCategory(String),
}

impl InputValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::EmptyCategories => "empty_analysis_categories",
            Self::UnknownCategory(_) => "unknown_analysis_category",
            Self::DuplicateCategory(_) => "duplicate_analysis_category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedGenerateRequest {
    pub prompt: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAnalyzeRequest {
    pub code: String,
    pub language: String,
    pub categories: Vec<AnalysisCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCvRequest {
    pub prompt: String,
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, InputValidationError> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(InputValidationError::MissingField(field))
}

impl GenerateRequest {
    pub fn validate(self) -> Result<ValidatedGenerateRequest, InputValidationError> {
        let prompt = required_text(self.prompt, "prompt")?;
        let language = self
            .language
            .map(|raw| raw.trim().to_string())
            .filter(|trimmed| !trimmed.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_LANGUAGE.to_string());
        Ok(ValidatedGenerateRequest { prompt, language })
    }
}

impl AnalyzeRequest {
    pub fn validate(self) -> Result<ValidatedAnalyzeRequest, InputValidationError> {
        let code = required_text(self.code, "code")?;
        let language = required_text(self.language, "language")?;

        let raw_categories = self.analysis_categories.unwrap_or_default();
        if raw_categories.is_empty() {
            return Err(InputValidationError::EmptyCategories);
        }

        let mut categories = Vec::with_capacity(raw_categories.len());
        for raw in raw_categories {
            let category = AnalysisCategory::parse(&raw)
                .ok_or_else(|| InputValidationError::UnknownCategory(raw.clone()))?;
            if categories.contains(&category) {
                return Err(InputValidationError::DuplicateCategory(
                    category.key().to_string(),
                ));
            }
            categories.push(category);
        }

        Ok(ValidatedAnalyzeRequest {
            code,
            language,
            categories,
        })
    }
}

impl CvRequest {
    pub fn validate(self) -> Result<ValidatedCvRequest, InputValidationError> {
        Ok(ValidatedCvRequest {
            prompt: required_text(self.prompt, "prompt")?,
        })
    }
}
