use serde_json::Value;

use super::gateway::{GenerationOperation, ResponseFormat};
use crate::content::AnalysisCategory;

const ANALYSIS_SUBSECTIONS: [&str; 3] = ["Findings", "Assessment", "Recommendations"];

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub operation: GenerationOperation,
    pub system_prompt: &'static str,
    pub response_format: ResponseFormat,
    pub temperature: f32,
}

pub fn template_for_operation(operation: GenerationOperation) -> PromptTemplate {
    let (system_prompt, response_format, temperature) = match operation {
        GenerationOperation::FreeText => (
            "You are a professional content writer. Produce well-structured, original markdown articles.",
            ResponseFormat::Text,
            0.7,
        ),
        GenerationOperation::CodeAnalysis => (
            "You are a senior code reviewer. Analyze source code precisely and only report issues you can point to.",
            ResponseFormat::Text,
            0.2,
        ),
        GenerationOperation::CvDocument => (
            "You are a CV writing assistant. Return a single JSON object and nothing else.",
            ResponseFormat::JsonObject,
            0.3,
        ),
    };

    PromptTemplate {
        operation,
        system_prompt,
        response_format,
        temperature,
    }
}

pub fn free_text_prompt(topic: &str, language: &str) -> String {
    format!(
        "Write a detailed, engaging article about the topic below.\n\
         Requirements:\n\
         - Respond in this language: {language}\n\
         - Use markdown with a title, an introduction, at least three sections and a conclusion\n\
         - Keep a clear, informative and friendly tone\n\
         - Do not mention that you are an AI\n\n\
         Topic: {topic}"
    )
}

pub fn code_analysis_prompt(code: &str, language: &str, categories: &[AnalysisCategory]) -> String {
    let mut prompt = format!(
        "Analyze the following {language} code. Produce exactly one top-level markdown \
         section per category listed below, in the same order. Start each section with a \
         line of the form `# <Category Title>` and use these subsections inside it:\n"
    );
    for subsection in ANALYSIS_SUBSECTIONS {
        prompt.push_str(&format!("## {subsection}\n"));
    }
    prompt.push_str("\nCategories:\n");
    for category in categories {
        prompt.push_str(&format!("- {} ({})\n", category.title(), category.key()));
    }
    prompt.push_str(&format!("\nCode:\n```{language}\n{code}\n```\n"));
    prompt
}

pub fn cv_prompt(description: &str, output_schema: &Value) -> String {
    format!(
        "Create a professional CV from the description below. Return JSON that matches this \
         JSON schema exactly; use empty strings or empty arrays for unknown values.\n\n\
         Schema:\n{output_schema}\n\n\
         Description:\n{description}"
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{code_analysis_prompt, cv_prompt, free_text_prompt, template_for_operation};
    use crate::content::AnalysisCategory;
    use crate::llm::gateway::{GenerationOperation, ResponseFormat};

    #[test]
    fn free_text_prompt_embeds_topic_and_language() {
        let prompt = free_text_prompt("Rust ownership", "tr");
        assert!(prompt.contains("Topic: Rust ownership"));
        assert!(prompt.contains("language: tr"));
    }

    #[test]
    fn code_analysis_prompt_lists_categories_in_order_with_subsections() {
        let prompt = code_analysis_prompt(
            "fn main() {}",
            "rust",
            &[AnalysisCategory::Security, AnalysisCategory::CodeQuality],
        );
        let security = prompt.find("- Security (security)").expect("security listed");
        let quality = prompt
            .find("- Code Quality (code_quality)")
            .expect("quality listed");
        assert!(security < quality);
        assert!(prompt.contains("## Findings"));
        assert!(prompt.contains("## Assessment"));
        assert!(prompt.contains("## Recommendations"));
        assert!(prompt.contains("```rust\nfn main() {}\n```"));
    }

    #[test]
    fn cv_template_requests_json_output() {
        let template = template_for_operation(GenerationOperation::CvDocument);
        assert_eq!(template.response_format, ResponseFormat::JsonObject);
        assert!(cv_prompt("backend engineer", &json!({"type": "object"})).contains("\"object\""));
    }
}
