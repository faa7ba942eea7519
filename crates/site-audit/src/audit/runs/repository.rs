use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::audit::domain::AuditResult;
use crate::audit::recommendations::Recommendation;
use crate::audit::summary::{AuditSummary, HealthBand, SeverityCounts};

/// Ordered by the numeric sequence suffix, so `audit-1000000` follows `audit-999999`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditId(pub String);

impl AuditId {
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix("audit-")?.parse().ok()
    }
}

impl Ord for AuditId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence()
            .cmp(&other.sequence())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for AuditId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stored audit run with its ranked output.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub audit_id: AuditId,
    pub audited_at: DateTime<Utc>,
    pub audit: AuditResult,
    pub recommendations: Vec<Recommendation>,
    pub summary: AuditSummary,
}

impl AuditRecord {
    pub fn record_view(&self) -> AuditRecordView {
        AuditRecordView {
            audit_id: self.audit_id.clone(),
            url: self.audit.url.clone(),
            audited_at: self.audited_at,
            overall_score: self.summary.overall_score,
            health: self.summary.health,
            severity_counts: self.summary.severity_counts,
            recommendation_count: self.recommendations.len(),
            top_recommendation: self
                .recommendations
                .first()
                .map(|record| record.title.clone()),
        }
    }
}

/// Storage abstraction so the service can be exercised without a database.
pub trait AuditRepository: Send + Sync {
    fn insert(&self, record: AuditRecord) -> Result<AuditRecord, RepositoryError>;
    fn fetch(&self, id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError>;
    /// Most recent runs first.
    fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("audit already exists")]
    Conflict,
    #[error("audit not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing entry for dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecordView {
    pub audit_id: AuditId,
    pub url: String,
    pub audited_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthBand>,
    pub severity_counts: SeverityCounts,
    pub recommendation_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_recommendation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_by_sequence_number() {
        let earlier = AuditId("audit-999999".to_string());
        let later = AuditId("audit-1000000".to_string());

        assert_eq!(later.sequence(), Some(1_000_000));
        assert!(earlier < later);
        assert_eq!(AuditId("imported".to_string()).sequence(), None);
    }
}
