use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::audit::domain::AuditId;
use crate::audit::repository::{
    AuditRecord, AuditRepository, PublishError, RepositoryError, ReviewPublisher,
    ReviewSubmission,
};
use crate::audit::{audit_router, AuditService};
use crate::checklist::domain::{ChecklistCategory, ChecklistItem, EvidenceKind};
use crate::checklist::ChecklistCatalog;

pub(super) fn opened_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date")
}

pub(super) fn standard_catalog() -> Arc<ChecklistCatalog> {
    Arc::new(ChecklistCatalog::standard())
}

/// A three-item checklist so completion flows stay short in tests. The
/// lobby item requires photo evidence, the turndown item requires none.
pub(super) fn compact_catalog() -> Arc<ChecklistCatalog> {
    let categories = vec![
        ChecklistCategory {
            id: "front-desk",
            name: "Front Desk",
            description: "Arrival touchpoints",
            weight: 0.6,
            items: vec![
                ChecklistItem {
                    id: "greeting",
                    category: "front-desk",
                    subcategory: None,
                    title: "Guest greeting",
                    description: "Guest welcomed promptly on arrival",
                    max_score: 10,
                    weight: 1.0,
                    permitted_evidence: vec![EvidenceKind::Text],
                    required_evidence: vec![EvidenceKind::Text],
                    scoring_criteria: "10: immediate warm welcome by name",
                },
                ChecklistItem {
                    id: "lobby-presentation",
                    category: "front-desk",
                    subcategory: None,
                    title: "Lobby presentation",
                    description: "Lobby is clean and fully staged",
                    max_score: 20,
                    weight: 1.0,
                    permitted_evidence: vec![EvidenceKind::Photo, EvidenceKind::Text],
                    required_evidence: vec![EvidenceKind::Photo],
                    scoring_criteria: "20: spotless with fresh arrangements",
                },
            ],
        },
        ChecklistCategory {
            id: "housekeeping",
            name: "Housekeeping",
            description: "Room readiness",
            weight: 0.4,
            items: vec![ChecklistItem {
                id: "turndown",
                category: "housekeeping",
                subcategory: None,
                title: "Turndown service",
                description: "Evening turndown executed on time",
                max_score: 10,
                weight: 1.0,
                permitted_evidence: vec![
                    EvidenceKind::Photo,
                    EvidenceKind::Video,
                    EvidenceKind::Text,
                ],
                required_evidence: Vec::new(),
                scoring_criteria: "10: full turndown with amenity placed",
            }],
        },
    ];
    Arc::new(ChecklistCatalog::new(categories).expect("valid checklist"))
}

pub(super) fn build_service() -> (
    AuditService<MemoryAuditRepository, MemoryReviewQueue>,
    Arc<MemoryAuditRepository>,
    Arc<MemoryReviewQueue>,
) {
    let repository = Arc::new(MemoryAuditRepository::default());
    let reviews = Arc::new(MemoryReviewQueue::default());
    let service = AuditService::new(compact_catalog(), repository.clone(), reviews.clone());
    (service, repository, reviews)
}

pub(super) fn build_standard_service() -> (
    AuditService<MemoryAuditRepository, MemoryReviewQueue>,
    Arc<MemoryAuditRepository>,
    Arc<MemoryReviewQueue>,
) {
    let repository = Arc::new(MemoryAuditRepository::default());
    let reviews = Arc::new(MemoryReviewQueue::default());
    let service = AuditService::new(standard_catalog(), repository.clone(), reviews.clone());
    (service, repository, reviews)
}

/// Drives every item of the compact checklist to completion.
pub(super) fn complete_all_items<P: ReviewPublisher>(
    service: &AuditService<MemoryAuditRepository, P>,
    audit_id: &AuditId,
) {
    service
        .update_item(
            audit_id,
            "greeting",
            Some(8.0),
            Some("Named the guest at the door".to_string()),
        )
        .expect("score greeting");
    service
        .add_evidence(
            audit_id,
            "greeting",
            EvidenceKind::Text,
            "Greeted within ten seconds".to_string(),
            None,
        )
        .expect("greeting evidence");
    service
        .complete_item(audit_id, "greeting")
        .expect("complete greeting");

    service
        .update_item(audit_id, "lobby-presentation", Some(15.0), None)
        .expect("score lobby");
    service
        .add_evidence(
            audit_id,
            "lobby-presentation",
            EvidenceKind::Photo,
            "s3://audits/lobby.jpg".to_string(),
            None,
        )
        .expect("lobby evidence");
    service
        .complete_item(audit_id, "lobby-presentation")
        .expect("complete lobby");

    service
        .update_item(audit_id, "turndown", Some(10.0), None)
        .expect("score turndown");
    service
        .complete_item(audit_id, "turndown")
        .expect("complete turndown");
}

#[derive(Default, Clone)]
pub(super) struct MemoryAuditRepository {
    pub(super) records: Arc<Mutex<HashMap<AuditId, AuditRecord>>>,
}

impl AuditRepository for MemoryAuditRepository {
    fn insert(&self, record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.audit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.audit_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AuditRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&record.audit_id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.audit_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, audit_id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(audit_id).cloned())
    }

    fn submitted(&self, limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<AuditRecord> = guard
            .values()
            .filter(|record| record.submitted_on.is_some())
            .cloned()
            .collect();
        records.sort_by(|a, b| b.submitted_on.cmp(&a.submitted_on));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryReviewQueue {
    submissions: Arc<Mutex<Vec<ReviewSubmission>>>,
}

impl MemoryReviewQueue {
    pub(super) fn submissions(&self) -> Vec<ReviewSubmission> {
        self.submissions
            .lock()
            .expect("review mutex poisoned")
            .clone()
    }
}

impl ReviewPublisher for MemoryReviewQueue {
    fn publish(&self, submission: ReviewSubmission) -> Result<(), PublishError> {
        self.submissions
            .lock()
            .expect("review mutex poisoned")
            .push(submission);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl AuditRepository for ConflictRepository {
    fn insert(&self, _record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: AuditRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _audit_id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        Ok(None)
    }

    fn submitted(&self, _limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AuditRepository for UnavailableRepository {
    fn insert(&self, _record: AuditRecord) -> Result<AuditRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: AuditRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _audit_id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn submitted(&self, _limit: usize) -> Result<Vec<AuditRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct RejectingReviewQueue;

impl ReviewPublisher for RejectingReviewQueue {
    fn publish(&self, _submission: ReviewSubmission) -> Result<(), PublishError> {
        Err(PublishError::Transport("review queue offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn audit_router_with_service(
    service: AuditService<MemoryAuditRepository, MemoryReviewQueue>,
) -> axum::Router {
    audit_router(Arc::new(service))
}
