use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::checklist::domain::EvidenceKind;
use crate::checklist::{ChecklistCatalog, ScoreAggregator};
use crate::report::{self, views::AuditScoreReport};

use super::domain::{
    AuditError, AuditId, AuditItemResponse, AuditStatus, CompletionStats, EvidenceRecord,
};
use super::repository::{
    AuditRecord, AuditRepository, PublishError, RepositoryError, ReviewPublisher,
    ReviewSubmission,
};
use super::session::AuditSession;

static AUDIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Orchestrates the audit lifecycle over a repository and a review hand-off
/// channel. The checklist catalog is fixed at construction and shared with
/// the score aggregator.
///
/// Every mutation loads the stored record, replays it into a session where
/// the workflow rules live, and writes the result back. Once an audit is
/// submitted it becomes read-only here; the review system owns it from then
/// on.
pub struct AuditService<R, P> {
    catalog: Arc<ChecklistCatalog>,
    aggregator: ScoreAggregator,
    repository: Arc<R>,
    reviews: Arc<P>,
}

impl<R, P> AuditService<R, P>
where
    R: AuditRepository,
    P: ReviewPublisher,
{
    pub fn new(catalog: Arc<ChecklistCatalog>, repository: Arc<R>, reviews: Arc<P>) -> Self {
        let aggregator = ScoreAggregator::new(catalog.clone());
        Self {
            catalog,
            aggregator,
            repository,
            reviews,
        }
    }

    pub fn catalog(&self) -> &ChecklistCatalog {
        &self.catalog
    }

    fn next_audit_id() -> AuditId {
        let id = AUDIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        AuditId(format!("audit-{id:06}"))
    }

    /// Opens a scheduled audit for a property and auditor pair.
    pub fn open(
        &self,
        property: String,
        auditor: String,
        opened_on: NaiveDate,
    ) -> Result<AuditRecord, AuditServiceError> {
        let record = AuditRecord {
            audit_id: Self::next_audit_id(),
            property,
            auditor,
            status: AuditStatus::Scheduled,
            opened_on,
            submitted_on: None,
            responses: Vec::new(),
            evidence_seq: 0,
        };
        Ok(self.repository.insert(record)?)
    }

    pub fn get(&self, audit_id: &AuditId) -> Result<AuditRecord, AuditServiceError> {
        Ok(self
            .repository
            .fetch(audit_id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    pub fn update_item(
        &self,
        audit_id: &AuditId,
        item_id: &str,
        score: Option<f64>,
        notes: Option<String>,
    ) -> Result<AuditItemResponse, AuditServiceError> {
        let record = self.load_open(audit_id)?;
        let mut session = self.session(&record);
        let response = session.update_response(item_id, score, notes)?;
        self.store(record, session)?;
        Ok(response)
    }

    pub fn add_evidence(
        &self,
        audit_id: &AuditId,
        item_id: &str,
        kind: EvidenceKind,
        content: String,
        description: Option<String>,
    ) -> Result<EvidenceRecord, AuditServiceError> {
        let record = self.load_open(audit_id)?;
        let mut session = self.session(&record);
        let evidence = session.add_evidence(item_id, kind, content, description)?;
        self.store(record, session)?;
        Ok(evidence)
    }

    pub fn remove_evidence(
        &self,
        audit_id: &AuditId,
        item_id: &str,
        evidence_id: &str,
    ) -> Result<(), AuditServiceError> {
        let record = self.load_open(audit_id)?;
        let mut session = self.session(&record);
        session.remove_evidence(item_id, evidence_id)?;
        self.store(record, session)?;
        Ok(())
    }

    pub fn describe_evidence(
        &self,
        audit_id: &AuditId,
        item_id: &str,
        evidence_id: &str,
        description: String,
    ) -> Result<(), AuditServiceError> {
        let record = self.load_open(audit_id)?;
        let mut session = self.session(&record);
        session.describe_evidence(item_id, evidence_id, description)?;
        self.store(record, session)?;
        Ok(())
    }

    /// Marks an item complete and reports overall completion afterwards.
    pub fn complete_item(
        &self,
        audit_id: &AuditId,
        item_id: &str,
    ) -> Result<CompletionStats, AuditServiceError> {
        let record = self.load_open(audit_id)?;
        let mut session = self.session(&record);
        let stats = session.mark_complete(item_id)?;
        self.store(record, session)?;
        Ok(stats)
    }

    /// Persists the current response set as-is. Drafts save at any
    /// completion level.
    pub fn save_draft(&self, audit_id: &AuditId) -> Result<AuditRecord, AuditServiceError> {
        let mut record = self.load_open(audit_id)?;
        let session = self.session(&record);
        record.responses = session.ordered_responses();
        record.evidence_seq = session.evidence_seq();
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Submits a fully completed audit: the record is frozen and the full
    /// response set is handed to the review system.
    pub fn submit(
        &self,
        audit_id: &AuditId,
        submitted_on: NaiveDate,
    ) -> Result<ReviewSubmission, AuditServiceError> {
        let mut record = self.load_open(audit_id)?;
        let session = self.session(&record);
        record.responses = session.submission()?;
        record.status = AuditStatus::Submitted;
        record.submitted_on = Some(submitted_on);
        let submission = ReviewSubmission::from_record(&self.catalog, &record, submitted_on);
        self.repository.update(record)?;
        self.reviews.publish(submission.clone())?;
        Ok(submission)
    }

    /// Weighted score report over whatever has been scored so far.
    pub fn score_report(&self, audit_id: &AuditId) -> Result<AuditScoreReport, AuditServiceError> {
        let record = self.get(audit_id)?;
        Ok(report::audit_score_report(&self.aggregator, &record))
    }

    fn load_open(&self, audit_id: &AuditId) -> Result<AuditRecord, AuditServiceError> {
        let record = self
            .repository
            .fetch(audit_id)?
            .ok_or(RepositoryError::NotFound)?;
        if record.status == AuditStatus::Submitted {
            return Err(AuditError::AlreadySubmitted(audit_id.0.clone()).into());
        }
        Ok(record)
    }

    fn session(&self, record: &AuditRecord) -> AuditSession {
        AuditSession::from_responses(
            self.catalog.clone(),
            record.responses.clone(),
            record.evidence_seq,
        )
    }

    fn store(
        &self,
        mut record: AuditRecord,
        session: AuditSession,
    ) -> Result<(), AuditServiceError> {
        record.responses = session.ordered_responses();
        record.evidence_seq = session.evidence_seq();
        if record.status == AuditStatus::Scheduled {
            record.status = AuditStatus::InProgress;
        }
        self.repository.update(record)?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuditServiceError {
    #[error(transparent)]
    Audit(#[from] AuditError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Review(#[from] PublishError),
}
