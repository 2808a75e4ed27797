use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistCatalog;

use super::domain::{
    AuditId, AuditItemResponse, AuditItemResponseView, AuditStatus, CompletionStats,
    EvidenceRecord,
};

/// Persistent state of one audit: who is auditing what, where it sits in the
/// lifecycle, and every response captured so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub audit_id: AuditId,
    pub property: String,
    pub auditor: String,
    pub status: AuditStatus,
    pub opened_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_on: Option<NaiveDate>,
    pub responses: Vec<AuditItemResponse>,
    pub evidence_seq: u64,
}

impl AuditRecord {
    pub fn completion(&self, total_items: usize) -> CompletionStats {
        CompletionStats {
            completed: self
                .responses
                .iter()
                .filter(|response| response.completed)
                .count(),
            total: total_items,
        }
    }

    pub fn summary_view(&self, total_items: usize) -> AuditSummaryView {
        let stats = self.completion(total_items);
        AuditSummaryView {
            audit_id: self.audit_id.clone(),
            property: self.property.clone(),
            auditor: self.auditor.clone(),
            status: self.status,
            status_label: self.status.label(),
            opened_on: self.opened_on,
            submitted_on: self.submitted_on,
            completed: stats.completed,
            total: stats.total,
        }
    }

    pub fn detail_view(&self, total_items: usize) -> AuditDetailView {
        let stats = self.completion(total_items);
        AuditDetailView {
            audit_id: self.audit_id.clone(),
            property: self.property.clone(),
            auditor: self.auditor.clone(),
            status: self.status,
            status_label: self.status.label(),
            opened_on: self.opened_on,
            submitted_on: self.submitted_on,
            completed: stats.completed,
            total: stats.total,
            responses: self
                .responses
                .iter()
                .map(AuditItemResponse::to_view)
                .collect(),
        }
    }
}

/// Roster line for dashboards listing audits.
#[derive(Debug, Clone, Serialize)]
pub struct AuditSummaryView {
    pub audit_id: AuditId,
    pub property: String,
    pub auditor: String,
    pub status: AuditStatus,
    pub status_label: &'static str,
    pub opened_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_on: Option<NaiveDate>,
    pub completed: usize,
    pub total: usize,
}

/// Full audit payload including every item response.
#[derive(Debug, Clone, Serialize)]
pub struct AuditDetailView {
    pub audit_id: AuditId,
    pub property: String,
    pub auditor: String,
    pub status: AuditStatus,
    pub status_label: &'static str,
    pub opened_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_on: Option<NaiveDate>,
    pub completed: usize,
    pub total: usize,
    pub responses: Vec<AuditItemResponseView>,
}

/// Storage boundary for audit records.
pub trait AuditRepository: Send + Sync {
    fn insert(&self, record: AuditRecord) -> Result<AuditRecord, RepositoryError>;
    fn update(&self, record: AuditRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, audit_id: &AuditId) -> Result<Option<AuditRecord>, RepositoryError>;
    fn submitted(&self, limit: usize) -> Result<Vec<AuditRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("audit record already exists")]
    Conflict,
    #[error("audit record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only package handed to the corporate review system when an audit is
/// submitted. Scoring criteria are carried through verbatim for the reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub audit_id: AuditId,
    pub property: String,
    pub auditor: String,
    pub submitted_on: NaiveDate,
    pub items: Vec<ReviewItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub item_id: String,
    pub title: String,
    pub scoring_criteria: String,
    pub score: Option<f64>,
    pub notes: String,
    pub evidence: Vec<EvidenceRecord>,
}

impl ReviewSubmission {
    /// Joins a submitted record with its catalog so reviewers see each
    /// response next to the standard it was scored against.
    pub fn from_record(
        catalog: &ChecklistCatalog,
        record: &AuditRecord,
        submitted_on: NaiveDate,
    ) -> Self {
        let items = record
            .responses
            .iter()
            .filter_map(|response| {
                catalog.find_item(&response.item_id).map(|item| ReviewItem {
                    item_id: response.item_id.clone(),
                    title: item.title.to_owned(),
                    scoring_criteria: item.scoring_criteria.to_owned(),
                    score: response.score,
                    notes: response.notes.clone(),
                    evidence: response.evidence.clone(),
                })
            })
            .collect();
        Self {
            audit_id: record.audit_id.clone(),
            property: record.property.clone(),
            auditor: record.auditor.clone(),
            submitted_on,
            items,
        }
    }
}

/// Hand-off boundary for completed audits.
pub trait ReviewPublisher: Send + Sync {
    fn publish(&self, submission: ReviewSubmission) -> Result<(), PublishError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("review transport unavailable: {0}")]
    Transport(String),
}
