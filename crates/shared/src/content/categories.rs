use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisCategory {
    CodeQuality,
    Security,
    Performance,
    BestPractices,
    Maintainability,
    Bugs,
}

impl AnalysisCategory {
    pub const ALL: [Self; 6] = [
        Self::CodeQuality,
        Self::Security,
        Self::Performance,
        Self::BestPractices,
        Self::Maintainability,
        Self::Bugs,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::CodeQuality => "code_quality",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::BestPractices => "best_practices",
            Self::Maintainability => "maintainability",
            Self::Bugs => "bugs",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::CodeQuality => "Code Quality",
            Self::Security => "Security",
            Self::Performance => "Performance",
            Self::BestPractices => "Best Practices",
            Self::Maintainability => "Maintainability",
            Self::Bugs => "Potential Bugs",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::CodeQuality => "📊",
            Self::Security => "🔒",
            Self::Performance => "⚡",
            Self::BestPractices => "✅",
            Self::Maintainability => "🔧",
            Self::Bugs => "🐛",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisCategoryResult {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub analysis_text: String,
}

impl AnalysisCategoryResult {
    pub fn new(category: AnalysisCategory, analysis_text: String) -> Self {
        Self {
            key: category.key().to_string(),
            title: category.title().to_string(),
            icon: category.icon().to_string(),
            analysis_text,
        }
    }
}
