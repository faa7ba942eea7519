use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use serde_json::json;
use site_audit::audit::runs::{audit_router, AuditRepository, AuditService};
use site_audit::audit::{AuditAnalysis, AuditResult};
use site_audit::error::AppError;
use std::sync::Arc;

pub(crate) fn with_audit_routes<R>(service: Arc<AuditService<R>>) -> axum::Router
where
    R: AuditRepository + 'static,
{
    audit_router(service.clone())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/recommendations",
            post(preview_endpoint::<R>).with_state(service),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Rank and summarize an audit without storing it.
pub(crate) async fn preview_endpoint<R>(
    State(service): State<Arc<AuditService<R>>>,
    Json(audit): Json<AuditResult>,
) -> Result<Json<AuditAnalysis>, AppError>
where
    R: AuditRepository + 'static,
{
    let analysis = service.preview(&audit)?;
    Ok(Json(analysis))
}
