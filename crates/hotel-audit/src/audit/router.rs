use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use crate::checklist::domain::EvidenceKind;

use super::domain::{AuditError, AuditId};
use super::repository::{AuditRepository, RepositoryError, ReviewPublisher};
use super::service::{AuditService, AuditServiceError};

/// HTTP surface for the audit workflow. Unknown audits, items, and evidence
/// map to 404, workflow violations to 422, and storage conflicts to 409.
pub fn audit_router<R, P>(service: Arc<AuditService<R, P>>) -> Router
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    Router::new()
        .route("/api/v1/audits", post(open_audit::<R, P>))
        .route("/api/v1/audits/:audit_id", get(audit_detail::<R, P>))
        .route("/api/v1/audits/:audit_id/save", post(save_audit_draft::<R, P>))
        .route("/api/v1/audits/:audit_id/submit", post(submit_audit::<R, P>))
        .route(
            "/api/v1/audits/:audit_id/score-report",
            get(audit_score_report::<R, P>),
        )
        .route(
            "/api/v1/audits/:audit_id/items/:item_id",
            put(update_item::<R, P>),
        )
        .route(
            "/api/v1/audits/:audit_id/items/:item_id/complete",
            post(complete_item::<R, P>),
        )
        .route(
            "/api/v1/audits/:audit_id/items/:item_id/evidence",
            post(add_evidence::<R, P>),
        )
        .route(
            "/api/v1/audits/:audit_id/items/:item_id/evidence/:evidence_id",
            delete(remove_evidence::<R, P>),
        )
        .route("/api/v1/checklist", get(checklist_catalog::<R, P>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAuditRequest {
    pub property: String,
    pub auditor: String,
    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateItemRequest {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddEvidenceRequest {
    pub kind: EvidenceKind,
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmitAuditRequest {
    #[serde(default)]
    pub submitted_on: Option<NaiveDate>,
}

pub(crate) async fn open_audit<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Json(payload): Json<OpenAuditRequest>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    let opened_on = payload
        .opened_on
        .unwrap_or_else(|| Local::now().date_naive());
    match service.open(payload.property, payload.auditor, opened_on) {
        Ok(record) => {
            let view = record.summary_view(service.catalog().item_count());
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn audit_detail<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path(audit_id): Path<String>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.get(&AuditId(audit_id)) {
        Ok(record) => {
            let view = record.detail_view(service.catalog().item_count());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_item<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path((audit_id, item_id)): Path<(String, String)>,
    Json(payload): Json<UpdateItemRequest>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.update_item(&AuditId(audit_id), &item_id, payload.score, payload.notes) {
        Ok(response) => (StatusCode::OK, Json(response.to_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_evidence<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path((audit_id, item_id)): Path<(String, String)>,
    Json(payload): Json<AddEvidenceRequest>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.add_evidence(
        &AuditId(audit_id),
        &item_id,
        payload.kind,
        payload.content,
        payload.description,
    ) {
        Ok(evidence) => (StatusCode::CREATED, Json(evidence)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_evidence<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path((audit_id, item_id, evidence_id)): Path<(String, String, String)>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.remove_evidence(&AuditId(audit_id), &item_id, &evidence_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_item<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path((audit_id, item_id)): Path<(String, String)>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.complete_item(&AuditId(audit_id), &item_id) {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({
                "completed": stats.completed,
                "total": stats.total,
                "percentage": stats.percentage(),
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_audit_draft<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path(audit_id): Path<String>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.save_draft(&AuditId(audit_id)) {
        Ok(record) => {
            let view = record.detail_view(service.catalog().item_count());
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_audit<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path(audit_id): Path<String>,
    payload: Option<Json<SubmitAuditRequest>>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    let submitted_on = payload
        .and_then(|Json(body)| body.submitted_on)
        .unwrap_or_else(|| Local::now().date_naive());
    match service.submit(&AuditId(audit_id), submitted_on) {
        Ok(submission) => (
            StatusCode::OK,
            Json(json!({
                "audit_id": submission.audit_id,
                "status": "submitted",
                "submitted_on": submission.submitted_on,
                "items": submission.items.len(),
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn audit_score_report<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
    Path(audit_id): Path<String>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    match service.score_report(&AuditId(audit_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn checklist_catalog<R, P>(
    State(service): State<Arc<AuditService<R, P>>>,
) -> Response
where
    R: AuditRepository + 'static,
    P: ReviewPublisher + 'static,
{
    let catalog = service.catalog();
    (
        StatusCode::OK,
        Json(json!({
            "categories": catalog.categories(),
            "item_count": catalog.item_count(),
        })),
    )
        .into_response()
}

fn error_response(error: AuditServiceError) -> Response {
    let status = match &error {
        AuditServiceError::Audit(AuditError::ItemNotFound(_))
        | AuditServiceError::Audit(AuditError::EvidenceNotFound { .. })
        | AuditServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AuditServiceError::Audit(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AuditServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AuditServiceError::Repository(RepositoryError::Unavailable(_))
        | AuditServiceError::Review(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
