use super::categories::{AnalysisCategory, AnalysisCategoryResult};

pub const NO_FINDINGS_TEXT: &str = "No findings available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSection {
    pub heading: String,
    /// Full section text, heading line included.
    pub text: String,
}

/// Returns the heading text when `line` is a single `#`, a space, then
/// non-empty text. Extra whitespace around the text is trimmed.
fn top_level_heading(line: &str) -> Option<&str> {
    let heading = line.strip_prefix("# ")?.trim();
    (!heading.is_empty()).then_some(heading)
}

/// Splits markdown at top-level headings. Text before the first heading is
/// dropped unless the document has no headings at all.
pub fn split_sections(markdown: &str) -> Vec<MarkdownSection> {
    let mut sections = Vec::new();
    let mut current: Option<MarkdownSection> = None;

    for line in markdown.lines() {
        if let Some(heading) = top_level_heading(line) {
            if let Some(section) = current.take() {
                sections.push(finish_section(section));
            }
            current = Some(MarkdownSection {
                heading: heading.to_string(),
                text: format!("{line}\n"),
            });
            continue;
        }

        if let Some(section) = current.as_mut() {
            section.text.push_str(line);
            section.text.push('\n');
        }
    }

    if let Some(section) = current.take() {
        sections.push(finish_section(section));
    }

    if sections.is_empty() && !markdown.trim().is_empty() {
        sections.push(MarkdownSection {
            heading: String::new(),
            text: markdown.trim().to_string(),
        });
    }

    sections
}

fn finish_section(mut section: MarkdownSection) -> MarkdownSection {
    section.text = section.text.trim_end().to_string();
    section
}

fn mentions_category(haystack: &str, category: AnalysisCategory) -> bool {
    let haystack = haystack.to_lowercase();
    haystack.contains(category.key()) || haystack.contains(&category.title().to_lowercase())
}

fn placeholder_section(category: AnalysisCategory) -> String {
    format!("# {}\n\n{NO_FINDINGS_TEXT}", category.title())
}

/// Maps provider markdown onto the requested categories. The output always
/// has one entry per requested category, in request order.
pub fn parse_category_sections(
    markdown: &str,
    categories: &[AnalysisCategory],
) -> Vec<AnalysisCategoryResult> {
    let sections = split_sections(markdown);

    categories
        .iter()
        .map(|category| {
            let matched = sections
                .iter()
                .find(|section| mentions_category(&section.heading, *category))
                .or_else(|| {
                    sections
                        .iter()
                        .find(|section| mentions_category(&section.text, *category))
                });

            let text = matched
                .map(|section| section.text.clone())
                .unwrap_or_else(|| placeholder_section(*category));
            AnalysisCategoryResult::new(*category, text)
        })
        .collect()
}
