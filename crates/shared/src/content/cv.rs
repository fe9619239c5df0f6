use std::sync::LazyLock;

use jsonschema::JSONSchema;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CvDocument {
    pub full_name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub experience: Vec<CvExperience>,
    pub education: Vec<CvEducation>,
    pub skills: Vec<String>,
    pub languages: Vec<CvLanguage>,
    pub links: Vec<CvLink>,
    pub projects: Vec<CvProject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvExperience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvEducation {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvLanguage {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CvValidationError {
    #[error("cv output is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("cv schema failed to compile: {0}")]
    SchemaCompile(String),
    #[error("cv output failed schema validation: {0:?}")]
    SchemaViolation(Vec<String>),
}

pub fn cv_output_schema() -> Value {
    serde_json::to_value(schema_for!(CvDocument)).expect("cv schema should be serializable")
}

static CV_VALIDATOR: LazyLock<Result<JSONSchema, String>> =
    LazyLock::new(|| JSONSchema::compile(&cv_output_schema()).map_err(|err| err.to_string()));

/// Parses provider output into a [`CvDocument`], tolerating a surrounding
/// markdown code fence.
pub fn parse_cv_output(raw: &str) -> Result<CvDocument, CvValidationError> {
    let payload: Value = serde_json::from_str(strip_code_fence(raw))?;
    validate_cv_value(&payload)
}

pub fn validate_cv_value(payload: &Value) -> Result<CvDocument, CvValidationError> {
    let validator = CV_VALIDATOR
        .as_ref()
        .map_err(|message| CvValidationError::SchemaCompile(message.clone()))?;

    if let Err(validation_errors) = validator.validate(payload) {
        let errors = validation_errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(CvValidationError::SchemaViolation(errors));
    }

    Ok(serde_json::from_value(payload.clone())?)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(without_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = without_open
        .strip_prefix("json")
        .unwrap_or(without_open)
        .trim_start();
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CvValidationError, parse_cv_output, validate_cv_value};

    fn valid_cv() -> serde_json::Value {
        json!({
            "fullName": "Ayşe Yılmaz",
            "title": "Backend Engineer",
            "location": "İstanbul",
            "email": "ayse@example.com",
            "phone": "+90 555 000 00 00",
            "experience": [{
                "company": "Acme",
                "position": "Engineer",
                "startDate": "2021-01",
                "endDate": "present",
                "description": "Built payment APIs."
            }],
            "education": [],
            "skills": ["Rust", "PostgreSQL"],
            "languages": [{ "name": "English", "level": "C1" }],
            "links": [],
            "projects": []
        })
    }

    #[test]
    fn accepts_schema_conforming_cv() {
        let cv = validate_cv_value(&valid_cv()).expect("valid cv should pass");
        assert_eq!(cv.full_name, "Ayşe Yılmaz");
        assert_eq!(cv.skills.len(), 2);
    }

    #[test]
    fn accepts_fenced_json() {
        let raw = format!("```json\n{}\n```", valid_cv());
        assert!(parse_cv_output(&raw).is_ok());
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut payload = valid_cv();
        payload
            .as_object_mut()
            .expect("object payload")
            .remove("experience");
        let err = validate_cv_value(&payload).expect_err("missing field must fail");
        assert!(matches!(err, CvValidationError::SchemaViolation(_)));
    }

    #[test]
    fn rejects_non_json_output() {
        let err = parse_cv_output("Here is your CV: John Doe").expect_err("prose must fail");
        assert!(matches!(err, CvValidationError::InvalidJson(_)));
    }
}
