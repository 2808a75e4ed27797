use serde::{Deserialize, Serialize};

use crate::checklist::domain::EvidenceKind;

/// Identifier assigned to an audit when it is opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditId(pub String);

impl std::fmt::Display for AuditId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of an audit within this service. Review stages past submission
/// belong to the corporate review system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Scheduled,
    InProgress,
    Submitted,
}

impl AuditStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AuditStatus::Scheduled => "scheduled",
            AuditStatus::InProgress => "in_progress",
            AuditStatus::Submitted => "submitted",
        }
    }
}

/// A single piece of evidence attached to a checklist item response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub id: String,
    pub kind: EvidenceKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Progress of a single checklist item, derived from its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseState {
    NotStarted,
    InProgress,
    Completed,
}

impl ResponseState {
    pub const fn label(self) -> &'static str {
        match self {
            ResponseState::NotStarted => "not started",
            ResponseState::InProgress => "in progress",
            ResponseState::Completed => "completed",
        }
    }
}

/// An auditor's working answer for one checklist item. Created the first time
/// the auditor touches the item and carried on the audit record afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditItemResponse {
    pub item_id: String,
    pub score: Option<f64>,
    pub notes: String,
    pub evidence: Vec<EvidenceRecord>,
    pub completed: bool,
}

impl AuditItemResponse {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            score: None,
            notes: String::new(),
            evidence: Vec::new(),
            completed: false,
        }
    }

    pub fn state(&self) -> ResponseState {
        if self.completed {
            ResponseState::Completed
        } else if self.score.is_some() || !self.notes.is_empty() || !self.evidence.is_empty() {
            ResponseState::InProgress
        } else {
            ResponseState::NotStarted
        }
    }

    pub fn to_view(&self) -> AuditItemResponseView {
        let state = self.state();
        AuditItemResponseView {
            item_id: self.item_id.clone(),
            score: self.score,
            notes: self.notes.clone(),
            evidence: self.evidence.clone(),
            completed: self.completed,
            state,
            state_label: state.label(),
        }
    }
}

/// Serialized response shape returned by the HTTP surface.
#[derive(Debug, Clone, Serialize)]
pub struct AuditItemResponseView {
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub notes: String,
    pub evidence: Vec<EvidenceRecord>,
    pub completed: bool,
    pub state: ResponseState,
    pub state_label: &'static str,
}

/// How many checklist items have been marked complete so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
}

impl CompletionStats {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

#[derive(Debug, PartialEq)]
pub enum AuditError {
    ItemNotFound(String),
    EvidenceNotFound {
        item_id: String,
        evidence_id: String,
    },
    ScoreOutOfRange {
        item_id: String,
        score: f64,
        max_score: u32,
    },
    EvidenceNotPermitted {
        item_id: String,
        kind: EvidenceKind,
    },
    MissingRequiredEvidence {
        item_id: String,
        missing: Vec<EvidenceKind>,
    },
    IncompleteAudit {
        completed: usize,
        total: usize,
    },
    AlreadySubmitted(String),
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::ItemNotFound(id) => write!(f, "checklist item {id} not found"),
            AuditError::EvidenceNotFound {
                item_id,
                evidence_id,
            } => write!(f, "evidence {evidence_id} not found on item {item_id}"),
            AuditError::ScoreOutOfRange {
                item_id,
                score,
                max_score,
            } => write!(f, "score {score} for item {item_id} is outside 0..={max_score}"),
            AuditError::EvidenceNotPermitted { item_id, kind } => {
                write!(f, "item {item_id} does not accept {} evidence", kind.label())
            }
            AuditError::MissingRequiredEvidence { item_id, missing } => {
                let kinds: Vec<&str> = missing.iter().map(|kind| kind.label()).collect();
                write!(
                    f,
                    "item {item_id} is missing required evidence: {}",
                    kinds.join(", ")
                )
            }
            AuditError::IncompleteAudit { completed, total } => {
                write!(f, "audit incomplete: {completed} of {total} items completed")
            }
            AuditError::AlreadySubmitted(id) => write!(f, "audit {id} has already been submitted"),
        }
    }
}

impl std::error::Error for AuditError {}
