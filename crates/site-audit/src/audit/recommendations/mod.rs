mod ranking;
mod rules;
mod technical;

pub use ranking::{prioritize, RankingConfig};
pub use rules::enhance_recommendation;
pub use technical::technical_issue_recommendations;

use super::domain::AuditResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordinal severity used as the primary ranking key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Displayed difficulty; never used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

impl Effort {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Performance,
    Images,
    Content,
    Metadata,
    Links,
    Crawlability,
}

impl RecommendationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Images => "Images",
            Self::Content => "Content",
            Self::Metadata => "Metadata",
            Self::Links => "Links",
            Self::Crawlability => "Crawlability",
        }
    }
}

/// Where a recommendation came from, for dashboards that group by source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationOrigin {
    TechnicalIssue,
    Finding,
    Fallback,
}

/// User-facing remediation record.
///
/// An empty `title` marks a record that another view already covers; [`prioritize`]
/// drops those before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub effort: Effort,
    pub category: RecommendationCategory,
    pub origin: RecommendationOrigin,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

impl Recommendation {
    pub fn suppressed(origin: RecommendationOrigin) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            impact: Impact::Low,
            effort: Effort::Easy,
            category: RecommendationCategory::Performance,
            origin,
            steps: Vec::new(),
            plugins: Vec::new(),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.title.is_empty()
    }
}

/// Stateless pipeline turning an audit into its ranked recommendation list.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RankingConfig,
}

impl RecommendationEngine {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn recommend(&self, audit: &AuditResult) -> Vec<Recommendation> {
        let context = audit.context();

        let mut records = technical_issue_recommendations(&context);
        let technical = records.len();

        records.extend(
            audit
                .findings
                .iter()
                .take(self.config.finding_limit)
                .map(|finding| enhance_recommendation(finding, &context)),
        );

        let ranked = prioritize(records, self.config.recommendation_limit);
        debug!(
            url = %audit.url,
            technical,
            findings = audit.findings.len(),
            ranked = ranked.len(),
            "ranked audit recommendations"
        );
        ranked
    }
}
