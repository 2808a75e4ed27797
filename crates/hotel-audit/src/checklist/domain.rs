use serde::{Deserialize, Serialize};

/// Kind of supporting evidence an auditor can attach to a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Photo,
    Video,
    Text,
}

impl EvidenceKind {
    pub const fn label(self) -> &'static str {
        match self {
            EvidenceKind::Photo => "photo",
            EvidenceKind::Video => "video",
            EvidenceKind::Text => "text",
        }
    }
}

/// A single auditable standard. Items are defined once at start-up and never
/// change for the lifetime of the process.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<&'static str>,
    pub title: &'static str,
    pub description: &'static str,
    pub max_score: u32,
    pub weight: f64,
    pub permitted_evidence: Vec<EvidenceKind>,
    pub required_evidence: Vec<EvidenceKind>,
    pub scoring_criteria: &'static str,
}

/// A weighted grouping of checklist items, e.g. everything evaluated during
/// check-in. Category weights are relative to each other.
#[derive(Debug, Clone, Serialize)]
pub struct ChecklistCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub weight: f64,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, PartialEq)]
pub enum ChecklistError {
    ItemNotFound(String),
    CategoryNotFound(String),
    DuplicateIdentifier(String),
    UnpermittedRequiredEvidence {
        item_id: String,
        kind: EvidenceKind,
    },
    InvalidMaxScore(String),
    CategoryMismatch(String),
}

impl std::fmt::Display for ChecklistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecklistError::ItemNotFound(id) => {
                write!(f, "checklist item {id} not found")
            }
            ChecklistError::CategoryNotFound(id) => {
                write!(f, "checklist category {id} not found")
            }
            ChecklistError::DuplicateIdentifier(id) => {
                write!(f, "identifier {id} appears more than once in the catalog")
            }
            ChecklistError::UnpermittedRequiredEvidence { item_id, kind } => {
                write!(
                    f,
                    "item {item_id} requires {} evidence but does not permit it",
                    kind.label()
                )
            }
            ChecklistError::InvalidMaxScore(id) => {
                write!(f, "item {id} must have a positive maximum score")
            }
            ChecklistError::CategoryMismatch(id) => {
                write!(f, "item {id} does not reference its owning category")
            }
        }
    }
}

impl std::error::Error for ChecklistError {}
