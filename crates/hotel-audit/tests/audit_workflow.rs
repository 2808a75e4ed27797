use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate};

use hotel_audit::audit::{
    AuditError, AuditId, AuditRecord, AuditRepository, AuditService, AuditServiceError,
    AuditStatus, PublishError, RepositoryError, ReviewPublisher, ReviewSubmission,
};
use hotel_audit::checklist::domain::{ChecklistItem, EvidenceKind};
use hotel_audit::checklist::ChecklistCatalog;

fn audit_dates() -> (NaiveDate, NaiveDate) {
    let opened_on = NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid open date");
    let submitted_on = opened_on + Duration::days(1);
    (opened_on, submitted_on)
}

#[derive(Default)]
struct MemoryRepository {
    records: Mutex<HashMap<AuditId, AuditRecord>>,
}

impl AuditRepository for MemoryRepository {
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
            .filter(|record| record.status == AuditStatus::Submitted)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.submitted_on.cmp(&a.submitted_on));
        records.truncate(limit);
        Ok(records)
    }
}

#[derive(Default)]
struct RecordingReviewQueue {
    submissions: Mutex<Vec<ReviewSubmission>>,
}

impl RecordingReviewQueue {
    fn submissions(&self) -> Vec<ReviewSubmission> {
        self.submissions
            .lock()
            .expect("review mutex poisoned")
            .clone()
    }
}

impl ReviewPublisher for RecordingReviewQueue {
    fn publish(&self, submission: ReviewSubmission) -> Result<(), PublishError> {
        self.submissions
            .lock()
            .expect("review mutex poisoned")
            .push(submission);
        Ok(())
    }
}

fn standard_service() -> (
    AuditService<MemoryRepository, RecordingReviewQueue>,
    Arc<MemoryRepository>,
    Arc<RecordingReviewQueue>,
    Arc<ChecklistCatalog>,
) {
    let catalog = Arc::new(ChecklistCatalog::standard());
    let repository = Arc::new(MemoryRepository::default());
    let reviews = Arc::new(RecordingReviewQueue::default());
    let service = AuditService::new(catalog.clone(), repository.clone(), reviews.clone());
    (service, repository, reviews, catalog)
}

/// Scores an item at a fraction of its maximum, attaches whatever evidence it
/// requires, and marks it complete.
fn finish_item(
    service: &AuditService<MemoryRepository, RecordingReviewQueue>,
    audit_id: &AuditId,
    item: &ChecklistItem,
    factor: f64,
) {
    service
        .update_item(
            audit_id,
            item.id,
            Some(item.max_score as f64 * factor),
            Some(format!("Reviewed {}", item.title)),
        )
        .expect("score accepted");
    for kind in &item.required_evidence {
        service
            .add_evidence(
                audit_id,
                item.id,
                *kind,
                format!("s3://audits/{}.{}", item.id, kind.label()),
                None,
            )
            .expect("evidence accepted");
    }
    service
        .complete_item(audit_id, item.id)
        .expect("item completes");
}

#[test]
fn full_audit_runs_from_open_to_review() {
    let (service, repository, reviews, catalog) = standard_service();
    let (opened_on, submitted_on) = audit_dates();

    let record = service
        .open(
            "Taj Mahal Palace".to_string(),
            "Meera Iyer".to_string(),
            opened_on,
        )
        .expect("audit opens");
    assert_eq!(record.status, AuditStatus::Scheduled);

    for item in catalog.items() {
        finish_item(&service, &record.audit_id, item, 0.8);
    }

    let extra = service
        .add_evidence(
            &record.audit_id,
            "dining-ambiance",
            EvidenceKind::Photo,
            "s3://audits/dining-window.jpg".to_string(),
            None,
        )
        .expect("extra evidence");
    service
        .describe_evidence(
            &record.audit_id,
            "dining-ambiance",
            &extra.id,
            "Window table at dusk".to_string(),
        )
        .expect("caption attached");

    let interim = service.get(&record.audit_id).expect("record loads");
    assert_eq!(interim.status, AuditStatus::InProgress);
    assert!(interim.completion(catalog.item_count()).is_complete());

    let submission = service
        .submit(&record.audit_id, submitted_on)
        .expect("submit succeeds");
    assert_eq!(submission.items.len(), 27);
    assert_eq!(submission.submitted_on, submitted_on);
    assert!(submission.items.iter().all(|item| item.score.is_some()));
    let ambiance = submission
        .items
        .iter()
        .find(|item| item.item_id == "dining-ambiance")
        .expect("ambiance item in submission");
    assert!(ambiance
        .evidence
        .iter()
        .any(|record| record.description.as_deref() == Some("Window table at dusk")));

    let stored = repository
        .fetch(&record.audit_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.status, AuditStatus::Submitted);
    assert_eq!(reviews.submissions().len(), 1);
    let roster = repository.submitted(10).expect("roster loads");
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].audit_id, record.audit_id);

    // every item at 80% of maximum lands the weighted total at 80
    let report = service
        .score_report(&record.audit_id)
        .expect("report available");
    assert!((report.overall_score - 80.0).abs() < 1e-9);
    assert!(report.completion.is_complete());

    match service.update_item(&record.audit_id, "valet-greeting", Some(2.0), None) {
        Err(AuditServiceError::Audit(AuditError::AlreadySubmitted(_))) => {}
        other => panic!("expected already submitted error, got {other:?}"),
    }
}

#[test]
fn early_submission_reports_progress() {
    let (service, _, reviews, catalog) = standard_service();
    let (opened_on, submitted_on) = audit_dates();
    let record = service
        .open(
            "Taj Lake Palace".to_string(),
            "Arjun Rao".to_string(),
            opened_on,
        )
        .expect("audit opens");

    for item in catalog.items().take(5) {
        finish_item(&service, &record.audit_id, item, 0.9);
    }

    match service.submit(&record.audit_id, submitted_on) {
        Err(AuditServiceError::Audit(AuditError::IncompleteAudit { completed, total })) => {
            assert_eq!(completed, 5);
            assert_eq!(total, 27);
        }
        other => panic!("expected incomplete audit error, got {other:?}"),
    }
    assert!(reviews.submissions().is_empty());
}

#[test]
fn completion_blocks_until_required_evidence_is_attached() {
    let (service, _, _, _) = standard_service();
    let (opened_on, _) = audit_dates();
    let record = service
        .open(
            "Taj Falaknuma Palace".to_string(),
            "Meera Iyer".to_string(),
            opened_on,
        )
        .expect("audit opens");

    service
        .update_item(
            &record.audit_id,
            "room-cleanliness",
            Some(18.0),
            Some("Dust-free, linens crisp".to_string()),
        )
        .expect("score accepted");
    service
        .add_evidence(
            &record.audit_id,
            "room-cleanliness",
            EvidenceKind::Text,
            "Checked all surfaces and under the bed".to_string(),
            None,
        )
        .expect("text evidence");

    match service.complete_item(&record.audit_id, "room-cleanliness") {
        Err(AuditServiceError::Audit(AuditError::MissingRequiredEvidence { item_id, missing })) => {
            assert_eq!(item_id, "room-cleanliness");
            assert_eq!(missing, vec![EvidenceKind::Photo]);
        }
        other => panic!("expected missing evidence error, got {other:?}"),
    }

    service
        .add_evidence(
            &record.audit_id,
            "room-cleanliness",
            EvidenceKind::Photo,
            "s3://audits/room-101.jpg".to_string(),
            Some("Bathroom after service".to_string()),
        )
        .expect("photo evidence");
    let stats = service
        .complete_item(&record.audit_id, "room-cleanliness")
        .expect("item completes");
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.total, 27);
}

#[test]
fn removing_required_evidence_blocks_recompletion() {
    let (service, _, _, _) = standard_service();
    let (opened_on, _) = audit_dates();
    let record = service
        .open(
            "Taj Coromandel".to_string(),
            "Arjun Rao".to_string(),
            opened_on,
        )
        .expect("audit opens");

    let photo = service
        .add_evidence(
            &record.audit_id,
            "dining-ambiance",
            EvidenceKind::Photo,
            "s3://audits/dining.jpg".to_string(),
            None,
        )
        .expect("photo evidence");
    service
        .complete_item(&record.audit_id, "dining-ambiance")
        .expect("item completes");

    service
        .remove_evidence(&record.audit_id, "dining-ambiance", &photo.id)
        .expect("evidence removed");

    match service.complete_item(&record.audit_id, "dining-ambiance") {
        Err(AuditServiceError::Audit(AuditError::MissingRequiredEvidence { missing, .. })) => {
            assert_eq!(missing, vec![EvidenceKind::Photo]);
        }
        other => panic!("expected missing evidence error, got {other:?}"),
    }
}

#[test]
fn evidence_kinds_follow_the_catalog() {
    let (service, _, _, _) = standard_service();
    let (opened_on, _) = audit_dates();
    let record = service
        .open(
            "Taj Bengal".to_string(),
            "Meera Iyer".to_string(),
            opened_on,
        )
        .expect("audit opens");

    // the concierge knowledge check accepts written notes only
    match service.add_evidence(
        &record.audit_id,
        "local-knowledge",
        EvidenceKind::Photo,
        "s3://audits/concierge.jpg".to_string(),
        None,
    ) {
        Err(AuditServiceError::Audit(AuditError::EvidenceNotPermitted { item_id, kind })) => {
            assert_eq!(item_id, "local-knowledge");
            assert_eq!(kind, EvidenceKind::Photo);
        }
        other => panic!("expected unpermitted evidence error, got {other:?}"),
    }
}
