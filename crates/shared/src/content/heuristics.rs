//! Offline findings used when the provider is unavailable.
//!
//! These are substring heuristics for illustration only. They are not static
//! analysis and every generated section says so.

use super::categories::{AnalysisCategory, AnalysisCategoryResult};

pub const HEURISTIC_NOTICE: &str =
    "_Heuristic preview generated without the analysis provider. It is not a static-analysis result._";

const LONG_LINE_THRESHOLD: usize = 120;
const LARGE_FILE_LINE_THRESHOLD: usize = 200;

struct PatternCheck {
    needle: &'static str,
    finding: &'static str,
}

const SECURITY_CHECKS: &[PatternCheck] = &[
    PatternCheck {
        needle: "eval(",
        finding: "Dynamic code evaluation (`eval`) can execute attacker-controlled input.",
    },
    PatternCheck {
        needle: "exec(",
        finding: "Dynamic execution (`exec`) detected; validate every input that reaches it.",
    },
    PatternCheck {
        needle: "innerhtml",
        finding: "Direct `innerHTML` assignment can enable cross-site scripting.",
    },
    PatternCheck {
        needle: "document.write",
        finding: "`document.write` injects raw markup into the page.",
    },
    PatternCheck {
        needle: "os.system",
        finding: "Shell command execution via `os.system` is prone to injection.",
    },
    PatternCheck {
        needle: "password",
        finding: "A `password` literal appears in source; make sure no secret is hard-coded.",
    },
];

const BEST_PRACTICE_CHECKS: &[PatternCheck] = &[
    PatternCheck {
        needle: "console.log",
        finding: "Debug logging with `console.log` left in code.",
    },
    PatternCheck {
        needle: "var ",
        finding: "`var` declarations found; prefer block-scoped `let`/`const`.",
    },
    PatternCheck {
        needle: "todo",
        finding: "Unresolved TODO markers remain in the code.",
    },
    PatternCheck {
        needle: "print(",
        finding: "Direct `print` calls; consider a logging facility.",
    },
];

const BUG_CHECKS: &[PatternCheck] = &[
    PatternCheck {
        needle: ".unwrap()",
        finding: "`unwrap()` panics on error or empty values.",
    },
    PatternCheck {
        needle: "except:",
        finding: "Bare `except:` swallows every exception, including interrupts.",
    },
    PatternCheck {
        needle: "catch (e) {}",
        finding: "Empty `catch` block silently discards errors.",
    },
    PatternCheck {
        needle: "== null",
        finding: "Loose `== null` comparison; check the intended nullability semantics.",
    },
];

struct CodeStats {
    line_count: usize,
    long_lines: usize,
    comment_lines: usize,
    loop_count: usize,
    function_count: usize,
}

impl CodeStats {
    fn measure(code: &str) -> Self {
        let mut stats = Self {
            line_count: 0,
            long_lines: 0,
            comment_lines: 0,
            loop_count: 0,
            function_count: 0,
        };

        for line in code.lines() {
            stats.line_count += 1;
            if line.chars().count() > LONG_LINE_THRESHOLD {
                stats.long_lines += 1;
            }

            let trimmed = line.trim_start();
            if trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with("/*")
                || trimmed.starts_with('*')
            {
                stats.comment_lines += 1;
            }
            if trimmed.starts_with("for ")
                || trimmed.starts_with("for(")
                || trimmed.starts_with("while ")
                || trimmed.starts_with("while(")
                || trimmed.contains(".forEach(")
            {
                stats.loop_count += 1;
            }
            if trimmed.starts_with("fn ")
                || trimmed.starts_with("pub fn ")
                || trimmed.starts_with("def ")
                || trimmed.starts_with("function ")
                || trimmed.contains("=> {")
            {
                stats.function_count += 1;
            }
        }

        stats
    }
}

pub fn heuristic_category_results(
    code: &str,
    language: &str,
    categories: &[AnalysisCategory],
) -> Vec<AnalysisCategoryResult> {
    let normalized = code.to_lowercase();
    let stats = CodeStats::measure(code);

    categories
        .iter()
        .map(|category| {
            let findings = findings_for(*category, &normalized, &stats);
            AnalysisCategoryResult::new(
                *category,
                render_section(*category, language, &findings),
            )
        })
        .collect()
}

fn pattern_findings(checks: &[PatternCheck], normalized_code: &str) -> Vec<String> {
    checks
        .iter()
        .filter(|check| normalized_code.contains(check.needle))
        .map(|check| check.finding.to_string())
        .collect()
}

fn findings_for(
    category: AnalysisCategory,
    normalized_code: &str,
    stats: &CodeStats,
) -> Vec<String> {
    match category {
        AnalysisCategory::Security => pattern_findings(SECURITY_CHECKS, normalized_code),
        AnalysisCategory::BestPractices => pattern_findings(BEST_PRACTICE_CHECKS, normalized_code),
        AnalysisCategory::Bugs => pattern_findings(BUG_CHECKS, normalized_code),
        AnalysisCategory::Performance => {
            let mut findings = Vec::new();
            if stats.loop_count >= 2 {
                findings.push(format!(
                    "{} loop constructs found; check whether any of them are nested over the same data.",
                    stats.loop_count
                ));
            }
            if normalized_code.contains(".clone()") {
                findings.push("`.clone()` calls may copy data unnecessarily.".to_string());
            }
            findings
        }
        AnalysisCategory::CodeQuality => {
            let mut findings = Vec::new();
            if stats.long_lines > 0 {
                findings.push(format!(
                    "{} line(s) exceed {LONG_LINE_THRESHOLD} characters.",
                    stats.long_lines
                ));
            }
            if stats.line_count > 10 && stats.comment_lines == 0 {
                findings.push("No comments found in a non-trivial snippet.".to_string());
            }
            findings
        }
        AnalysisCategory::Maintainability => {
            let mut findings = Vec::new();
            if stats.line_count > LARGE_FILE_LINE_THRESHOLD {
                findings.push(format!(
                    "{} lines in a single unit; consider splitting it into modules.",
                    stats.line_count
                ));
            }
            if stats.function_count == 0 && stats.line_count > 20 {
                findings.push("No function boundaries detected; logic may be hard to reuse.".to_string());
            }
            findings
        }
    }
}

fn render_section(category: AnalysisCategory, language: &str, findings: &[String]) -> String {
    let mut text = format!("# {}\n\n## Findings\n", category.title());
    if findings.is_empty() {
        text.push_str("- No obvious issues matched the offline checks.\n");
    } else {
        for finding in findings {
            text.push_str(&format!("- {finding}\n"));
        }
    }

    text.push_str("\n## Assessment\n");
    if findings.is_empty() {
        text.push_str(&format!(
            "The {language} snippet looks reasonable for this category at a glance.\n"
        ));
    } else {
        text.push_str(&format!(
            "{} potential concern(s) flagged in the {language} snippet.\n",
            findings.len()
        ));
    }

    text.push_str("\n## Recommendations\n");
    text.push_str("- Re-run the analysis when the provider is available for a detailed review.\n");
    text.push_str(&format!("\n{HEURISTIC_NOTICE}"));
    text
}
