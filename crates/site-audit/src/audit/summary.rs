use super::domain::AuditResult;
use super::recommendations::{Effort, Impact, Recommendation, RecommendationCategory};
use serde::{Deserialize, Serialize};

const GOOD_SCORE: u8 = 90;
const POOR_SCORE: u8 = 50;
const QUICK_WIN_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Critical,
    Warning,
    Notice,
}

impl IssueSeverity {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::Warning => 1,
            Self::Notice => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Notice => "Notice",
        }
    }

    pub const fn from_impact(impact: Impact) -> Self {
        match impact {
            Impact::High => Self::Critical,
            Impact::Medium => Self::Warning,
            Impact::Low => Self::Notice,
        }
    }
}

/// PageSpeed-style score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Good,
    NeedsImprovement,
    Poor,
}

impl HealthBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= GOOD_SCORE {
            Self::Good
        } else if score >= POOR_SCORE {
            Self::NeedsImprovement
        } else {
            Self::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryIssue {
    pub severity: IssueSeverity,
    pub severity_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RecommendationCategory>,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub notice: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthBand>,
    pub severity_counts: SeverityCounts,
    pub issues: Vec<SummaryIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_wins: Vec<String>,
}

/// Severity-tagged issue list for the dashboard header.
///
/// `ranked` is expected to be the output of the recommendation pipeline; its order is
/// preserved within each severity.
pub fn generate_audit_summary(audit: &AuditResult, ranked: &[Recommendation]) -> AuditSummary {
    let mut issues: Vec<SummaryIssue> = audit
        .scores
        .entries()
        .into_iter()
        .filter_map(|(category, score)| score.map(|score| (category, score)))
        .filter(|(_, score)| *score < GOOD_SCORE)
        .map(|(category, score)| {
            let severity = if score < POOR_SCORE {
                IssueSeverity::Critical
            } else {
                IssueSeverity::Warning
            };
            SummaryIssue {
                severity,
                severity_label: severity.label().to_string(),
                category: None,
                title: format!("{category} score is {score}"),
                detail: format!(
                    "{category} scored {score}/100 ({}).",
                    HealthBand::from_score(score).label()
                ),
            }
        })
        .collect();

    issues.extend(ranked.iter().map(|record| {
        let severity = IssueSeverity::from_impact(record.impact);
        SummaryIssue {
            severity,
            severity_label: severity.label().to_string(),
            category: Some(record.category),
            title: record.title.clone(),
            detail: record.description.clone(),
        }
    }));
    issues.sort_by_key(|issue| issue.severity.rank());

    let mut severity_counts = SeverityCounts::default();
    for issue in &issues {
        match issue.severity {
            IssueSeverity::Critical => severity_counts.critical += 1,
            IssueSeverity::Warning => severity_counts.warning += 1,
            IssueSeverity::Notice => severity_counts.notice += 1,
        }
    }

    let present: Vec<u32> = audit
        .scores
        .entries()
        .into_iter()
        .filter_map(|(_, score)| score.map(u32::from))
        .collect();
    let overall_score = if present.is_empty() {
        None
    } else {
        let mean = present.iter().sum::<u32>() as f32 / present.len() as f32;
        Some(mean.round().clamp(0.0, 100.0) as u8)
    };

    let quick_wins = ranked
        .iter()
        .filter(|record| record.effort == Effort::Easy && record.impact != Impact::Low)
        .take(QUICK_WIN_LIMIT)
        .map(|record| record.title.clone())
        .collect();

    AuditSummary {
        url: audit.url.clone(),
        overall_score,
        health: overall_score.map(HealthBand::from_score),
        severity_counts,
        issues,
        quick_wins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::recommendations::RecommendationOrigin;

    fn record(title: &str, impact: Impact, effort: Effort) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            description: format!("{title} detail"),
            impact,
            effort,
            category: RecommendationCategory::Performance,
            origin: RecommendationOrigin::Finding,
            steps: Vec::new(),
            plugins: Vec::new(),
        }
    }

    #[test]
    fn scores_below_ninety_become_issues() {
        let mut audit = AuditResult::new("https://example.com");
        audit.scores.performance = Some(42);
        audit.scores.seo = Some(88);
        audit.scores.accessibility = Some(97);

        let summary = generate_audit_summary(&audit, &[]);

        assert_eq!(summary.issues.len(), 2);
        assert_eq!(summary.issues[0].severity, IssueSeverity::Critical);
        assert_eq!(summary.issues[0].title, "Performance score is 42");
        assert_eq!(summary.issues[1].severity, IssueSeverity::Warning);
        assert_eq!(summary.overall_score, Some(76));
        assert_eq!(summary.health, Some(HealthBand::NeedsImprovement));
    }

    #[test]
    fn recommendations_are_tagged_by_impact_and_sorted() {
        let audit = AuditResult::new("https://example.com");
        let ranked = vec![
            record("high", Impact::High, Effort::Hard),
            record("low", Impact::Low, Effort::Easy),
            record("medium", Impact::Medium, Effort::Easy),
        ];

        let summary = generate_audit_summary(&audit, &ranked);

        let severities: Vec<IssueSeverity> =
            summary.issues.iter().map(|issue| issue.severity).collect();
        assert_eq!(
            severities,
            vec![
                IssueSeverity::Critical,
                IssueSeverity::Warning,
                IssueSeverity::Notice
            ]
        );
        assert_eq!(
            summary.severity_counts,
            SeverityCounts {
                critical: 1,
                warning: 1,
                notice: 1
            }
        );
        assert_eq!(summary.overall_score, None);
        assert_eq!(summary.health, None);
    }

    #[test]
    fn quick_wins_are_easy_and_not_low_impact() {
        let audit = AuditResult::new("https://example.com");
        let ranked = vec![
            record("a", Impact::High, Effort::Easy),
            record("b", Impact::High, Effort::Hard),
            record("c", Impact::Medium, Effort::Easy),
            record("d", Impact::Medium, Effort::Easy),
            record("e", Impact::Medium, Effort::Easy),
            record("f", Impact::Low, Effort::Easy),
        ];

        let summary = generate_audit_summary(&audit, &ranked);

        assert_eq!(summary.quick_wins, vec!["a", "c", "d"]);
    }
}
