use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::repository::{AuditId, AuditRecord, AuditRepository, RepositoryError};
use crate::audit::domain::{AuditInputError, AuditResult};
use crate::audit::recommendations::{RankingConfig, RecommendationEngine};
use crate::audit::views::{paginate, recommendation_views, Page, RecommendationFilter, RecommendationView};
use crate::audit::{analyze_audit, AuditAnalysis};

/// Service composing the recommendation engine with audit storage.
pub struct AuditService<R> {
    repository: Arc<R>,
    engine: Arc<RecommendationEngine>,
}

static AUDIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_audit_id() -> AuditId {
    let id = AUDIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AuditId(format!("audit-{id:06}"))
}

impl<R> AuditService<R>
where
    R: AuditRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: RankingConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(RecommendationEngine::new(config)),
        }
    }

    /// Rank an audit without storing it.
    pub fn preview(&self, audit: &AuditResult) -> Result<AuditAnalysis, AuditServiceError> {
        analyze_audit(&self.engine, audit).map_err(|err| {
            warn!(url = %audit.url, error = %err, "rejected audit preview");
            AuditServiceError::Input(err)
        })
    }

    /// Rank, summarize and store an audit run.
    pub fn submit(&self, audit: AuditResult) -> Result<AuditRecord, AuditServiceError> {
        let AuditAnalysis {
            recommendations,
            summary,
        } = self.preview(&audit)?;

        let record = AuditRecord {
            audit_id: next_audit_id(),
            audited_at: Utc::now(),
            audit,
            recommendations,
            summary,
        };

        let stored = self.repository.insert(record)?;
        info!(
            audit_id = %stored.audit_id.0,
            url = %stored.audit.url,
            recommendations = stored.recommendations.len(),
            critical = stored.summary.severity_counts.critical,
            "stored audit run"
        );
        Ok(stored)
    }

    pub fn get(&self, audit_id: &AuditId) -> Result<AuditRecord, AuditServiceError> {
        let record = self
            .repository
            .fetch(audit_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, AuditServiceError> {
        Ok(self.repository.recent(limit)?)
    }

    /// Filtered, paginated view of a stored run's ranked recommendations.
    pub fn recommendations(
        &self,
        audit_id: &AuditId,
        filter: &RecommendationFilter,
        page: usize,
        per_page: usize,
    ) -> Result<Page<RecommendationView>, AuditServiceError> {
        let record = self.get(audit_id)?;
        let views = filter.apply(recommendation_views(&record.recommendations));
        Ok(paginate(views, page, per_page))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuditServiceError {
    #[error(transparent)]
    Input(#[from] AuditInputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
