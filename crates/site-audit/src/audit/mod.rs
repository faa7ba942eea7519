//! Audit results in, ranked recommendations and summaries out.

pub mod catalog;
pub mod domain;
mod export;
pub mod recommendations;
pub mod runs;
pub mod summary;
pub mod views;

pub use domain::{
    AuditContext, AuditInputError, AuditResult, CategoryScores, Cms, PageBuilder, TechnicalIssues,
};
pub use export::{write_csv, ExportError};
pub use recommendations::{
    Effort, Impact, RankingConfig, Recommendation, RecommendationCategory, RecommendationEngine,
    RecommendationOrigin,
};
pub use summary::{generate_audit_summary, AuditSummary, HealthBand, IssueSeverity};
pub use views::{paginate, recommendation_views, Page, RecommendationFilter, RecommendationView};

use serde::Serialize;

/// Ranked recommendations with the summary derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct AuditAnalysis {
    pub recommendations: Vec<Recommendation>,
    pub summary: AuditSummary,
}

/// Validate an audit and run it through the recommendation pipeline.
pub fn analyze_audit(
    engine: &RecommendationEngine,
    audit: &AuditResult,
) -> Result<AuditAnalysis, AuditInputError> {
    audit.validate()?;
    let recommendations = engine.recommend(audit);
    let summary = generate_audit_summary(audit, &recommendations);
    Ok(AuditAnalysis {
        recommendations,
        summary,
    })
}
