use super::common::*;
use crate::audit::domain::AuditInputError;
use crate::audit::recommendations::{Impact, RecommendationOrigin};
use crate::audit::runs::repository::{AuditId, AuditRepository, RepositoryError};
use crate::audit::runs::{AuditService, AuditServiceError};
use crate::audit::summary::HealthBand;
use crate::audit::views::RecommendationFilter;
use std::sync::Arc;

fn titles(service: &AuditService<MemoryRepository>, id: &AuditId) -> Vec<String> {
    service
        .get(id)
        .expect("record stored")
        .recommendations
        .into_iter()
        .map(|record| record.title)
        .collect()
}

#[test]
fn submit_ranks_dedupes_and_stores() {
    let (service, repository) = build_service();

    let record = service.submit(wordpress_audit()).expect("audit accepted");

    assert!(record.audit_id.0.starts_with("audit-"));
    assert_eq!(
        titles(&service, &record.audit_id),
        vec![
            "Fix Broken Links",
            "Add Missing H1 Headings",
            "Eliminate Render-Blocking Resources",
            "Optimize Images",
            "Reduce Unused JavaScript",
            "Add Meta Descriptions",
            "Add Alt Text to Images",
            "Create an XML Sitemap",
            "Avoid enormous network payloads",
        ]
    );
    // The technical record wins the duplicate title over the finding-derived one.
    assert_eq!(
        record.recommendations[0].origin,
        RecommendationOrigin::TechnicalIssue
    );
    assert!(repository
        .fetch(&record.audit_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn submit_builds_summary_from_ranked_output() {
    let (service, _) = build_service();

    let record = service.submit(wordpress_audit()).expect("audit accepted");
    let summary = &record.summary;

    assert_eq!(summary.overall_score, Some(73));
    assert_eq!(summary.health, Some(HealthBand::NeedsImprovement));
    assert_eq!(summary.severity_counts.critical, 6);
    assert_eq!(summary.severity_counts.warning, 6);
    assert_eq!(summary.severity_counts.notice, 0);
    assert_eq!(summary.issues[0].title, "Performance score is 38");
    assert_eq!(
        summary.quick_wins,
        vec![
            "Add Missing H1 Headings",
            "Optimize Images",
            "Add Meta Descriptions"
        ]
    );
}

#[test]
fn submit_rejects_invalid_audits_without_storing() {
    let (service, repository) = build_service();

    match service.submit(invalid_audit()) {
        Err(AuditServiceError::Input(AuditInputError::UnsupportedScheme(scheme))) => {
            assert_eq!(scheme, "ftp")
        }
        other => panic!("expected input rejection, got {other:?}"),
    }
    assert!(repository.recent(10).expect("recent succeeds").is_empty());
}

#[test]
fn submit_propagates_repository_conflicts() {
    let service = AuditService::new(Arc::new(ConflictRepository), ranking_config());

    match service.submit(wordpress_audit()) {
        Err(AuditServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(&AuditId("audit-missing".to_string())) {
        Err(AuditServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn recent_returns_newest_first() {
    let (service, _) = build_service();
    let first = service.submit(wordpress_audit()).expect("first stored");
    let second = service.submit(wordpress_audit()).expect("second stored");

    let recent = service.recent(5).expect("recent succeeds");

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].audit_id, second.audit_id);
    assert_eq!(recent[1].audit_id, first.audit_id);
}

#[test]
fn recommendations_are_filtered_and_paginated() {
    let (service, _) = build_service();
    let record = service.submit(wordpress_audit()).expect("audit accepted");
    let filter = RecommendationFilter {
        impact: Some(Impact::Medium),
        ..RecommendationFilter::default()
    };

    let page = service
        .recommendations(&record.audit_id, &filter, 2, 3)
        .expect("page builds");

    assert_eq!(page.total_items, 4);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Avoid enormous network payloads");
    assert_eq!(page.items[0].rank, 9);
}

#[test]
fn finding_limit_caps_enriched_findings() {
    let repository = Arc::new(MemoryRepository::default());
    let mut config = ranking_config();
    config.finding_limit = 1;
    let service = AuditService::new(repository, config);
    let mut audit = wordpress_audit();
    audit.technical_issues = Default::default();

    let record = service.submit(audit).expect("audit accepted");

    assert_eq!(
        titles(&service, &record.audit_id),
        vec!["Eliminate Render-Blocking Resources"]
    );
}

#[test]
fn preview_does_not_store() {
    let (service, repository) = build_service();

    let analysis = service.preview(&wordpress_audit()).expect("preview builds");

    assert_eq!(analysis.recommendations.len(), 9);
    assert!(repository.recent(10).expect("recent succeeds").is_empty());
}
