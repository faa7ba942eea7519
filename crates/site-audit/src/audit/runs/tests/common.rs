use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::audit::domain::{AuditResult, CategoryScores, Cms, PageBuilder, TechnicalIssues};
use crate::audit::recommendations::RankingConfig;
use crate::audit::runs::repository::{AuditId, AuditRecord, AuditRepository, RepositoryError};
use crate::audit::runs::{audit_router, AuditService};

pub(super) fn ranking_config() -> RankingConfig {
    RankingConfig::default()
}

pub(super) fn wordpress_audit() -> AuditResult {
    AuditResult {
        url: "https://bakery.example.com".to_string(),
        cms: Some(Cms::WordPress),
        plugins: vec!["WP Rocket".to_string(), "Yoast SEO".to_string()],
        page_builder: Some(PageBuilder::Elementor),
        findings: vec![
            "Eliminate render-blocking resources".to_string(),
            "Image elements do not have [alt] attributes".to_string(),
            "Serve images in next-gen formats".to_string(),
            "Reduce unused JavaScript".to_string(),
            "Broken links detected on 3 pages".to_string(),
            "Avoid enormous network payloads".to_string(),
            "Ensure text remains visible during webfont load".to_string(),
            "Reduce initial server response time".to_string(),
        ],
        technical_issues: TechnicalIssues {
            broken_links: 3,
            missing_h1: 2,
            missing_meta_descriptions: 4,
            missing_alt_text: 7,
            sitemap_found: Some(false),
            robots_txt_found: Some(true),
            ..TechnicalIssues::default()
        },
        scores: CategoryScores {
            performance: Some(38),
            seo: Some(82),
            accessibility: Some(91),
            best_practices: Some(79),
        },
    }
}

pub(super) fn invalid_audit() -> AuditResult {
    AuditResult::new("ftp://bakery.example.com")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<BTreeMap<AuditId, AuditRecord>>>,
}

impl AuditRepository for MemoryRepository {
    fn insert(&self, record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex");
        if guard.contains_key(&record.audit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.audit_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex");
        Ok(guard.values().rev().take(limit).cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl AuditRepository for ConflictRepository {
    fn insert(&self, _record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AuditRepository for UnavailableRepository {
    fn insert(&self, _record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AuditService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = AuditService::new(Arc::new(repository.clone()), ranking_config());
    (Arc::new(service), repository)
}

pub(super) fn router_with_service(service: Arc<AuditService<MemoryRepository>>) -> axum::Router {
    audit_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
