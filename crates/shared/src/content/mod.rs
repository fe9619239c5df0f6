pub mod categories;
pub mod cv;
pub mod fallback;
pub mod heuristics;
pub mod sections;

pub use categories::{AnalysisCategory, AnalysisCategoryResult};
pub use cv::{CvDocument, CvValidationError, cv_output_schema, parse_cv_output};
pub use fallback::{
    FallbackRule, FallbackTopic, fallback_rules, select_fallback_content, select_fallback_rule,
    shortest_template_len,
};
pub use heuristics::{HEURISTIC_NOTICE, heuristic_category_results};
pub use sections::{MarkdownSection, NO_FINDINGS_TEXT, parse_category_sections, split_sections};
