use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hotel_audit::audit::{audit_router, AuditRepository, AuditService, ReviewPublisher};
use hotel_audit::checklist::{ChecklistCatalog, ScoreAggregator};
use hotel_audit::error::AppError;
use hotel_audit::import::ScoreSheetImporter;
use hotel_audit::report::{self, views::ScoreReport};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreReportRequest {
    pub(crate) score_csv: String,
}

pub(crate) fn with_audit_routes<R, P>(service: Arc<AuditService<R, P>>) -> axum::Router
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    audit_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/score-report",
            axum::routing::post(score_report_endpoint),
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

/// Builds a weighted score report straight from an uploaded CSV score sheet,
/// without touching any stored audit.
pub(crate) async fn score_report_endpoint(
    Json(payload): Json<ScoreReportRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let catalog = Arc::new(ChecklistCatalog::standard());
    let reader = Cursor::new(payload.score_csv.into_bytes());
    let scores = ScoreSheetImporter::from_reader(reader, &catalog)?;
    let aggregator = ScoreAggregator::new(catalog);
    Ok(Json(report::score_report(&aggregator, &scores)))
}
