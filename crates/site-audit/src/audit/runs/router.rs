use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{AuditId, AuditRecordView, AuditRepository, RepositoryError};
use super::service::{AuditService, AuditServiceError};
use crate::audit::domain::AuditResult;
use crate::audit::recommendations::{Effort, Impact, RecommendationCategory};
use crate::audit::views::{RecommendationFilter, DEFAULT_PAGE_SIZE};

const DEFAULT_RECENT_LIMIT: usize = 20;

/// Router builder exposing audit submission and dashboard reads.
pub fn audit_router<R>(service: Arc<AuditService<R>>) -> Router
where
    R: AuditRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/audits",
            post(submit_handler::<R>).get(recent_handler::<R>),
        )
        .route("/api/v1/audits/:audit_id", get(record_handler::<R>))
        .route(
            "/api/v1/audits/:audit_id/recommendations",
            get(recommendations_handler::<R>),
        )
        .route(
            "/api/v1/audits/:audit_id/summary",
            get(summary_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecentQuery {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationQuery {
    #[serde(default)]
    impact: Option<Impact>,
    #[serde(default)]
    effort: Option<Effort>,
    #[serde(default)]
    category: Option<RecommendationCategory>,
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    per_page: Option<usize>,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AuditService<R>>>,
    axum::Json(audit): axum::Json<AuditResult>,
) -> Response
where
    R: AuditRepository + 'static,
{
    match service.submit(audit) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => error_response(err, None),
    }
}

pub(crate) async fn recent_handler<R>(
    State(service): State<Arc<AuditService<R>>>,
    Query(query): Query<RecentQuery>,
) -> Response
where
    R: AuditRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    match service.recent(limit) {
        Ok(records) => {
            let views: Vec<AuditRecordView> =
                records.iter().map(|record| record.record_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err, None),
    }
}

pub(crate) async fn record_handler<R>(
    State(service): State<Arc<AuditService<R>>>,
    Path(audit_id): Path<String>,
) -> Response
where
    R: AuditRepository + 'static,
{
    let id = AuditId(audit_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn recommendations_handler<R>(
    State(service): State<Arc<AuditService<R>>>,
    Path(audit_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> Response
where
    R: AuditRepository + 'static,
{
    let id = AuditId(audit_id);
    let filter = RecommendationFilter {
        impact: query.impact,
        effort: query.effort,
        category: query.category,
    };
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PAGE_SIZE);

    match service.recommendations(&id, &filter, page, per_page) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<AuditService<R>>>,
    Path(audit_id): Path<String>,
) -> Response
where
    R: AuditRepository + 'static,
{
    let id = AuditId(audit_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.summary)).into_response(),
        Err(err) => error_response(err, Some(&id)),
    }
}

fn error_response(err: AuditServiceError, audit_id: Option<&AuditId>) -> Response {
    match err {
        AuditServiceError::Input(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AuditServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "audit not found",
                "audit_id": audit_id.map(|id| id.0.clone()),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        AuditServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "audit already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
