use chrono::NaiveDate;
use hotel_audit::audit::{
    AuditId, AuditRecord, AuditRepository, AuditStatus, PublishError, RepositoryError,
    ReviewPublisher, ReviewSubmission,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditRepository {
    records: Arc<Mutex<HashMap<AuditId, AuditRecord>>>,
}

impl AuditRepository for InMemoryAuditRepository {
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
        if guard.contains_key(&record.audit_id) {
            guard.insert(record.audit_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryReviewPublisher {
    submissions: Arc<Mutex<Vec<ReviewSubmission>>>,
}

impl ReviewPublisher for InMemoryReviewPublisher {
    fn publish(&self, submission: ReviewSubmission) -> Result<(), PublishError> {
        info!(
            audit_id = %submission.audit_id,
            items = submission.items.len(),
            "audit submission handed to review"
        );
        let mut guard = self.submissions.lock().expect("review mutex poisoned");
        guard.push(submission);
        Ok(())
    }
}

impl InMemoryReviewPublisher {
    pub(crate) fn submissions(&self) -> Vec<ReviewSubmission> {
        self.submissions
            .lock()
            .expect("review mutex poisoned")
            .clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
