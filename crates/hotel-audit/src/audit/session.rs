use std::collections::BTreeMap;
use std::sync::Arc;

use crate::checklist::domain::EvidenceKind;
use crate::checklist::ChecklistCatalog;

use super::domain::{AuditError, AuditItemResponse, CompletionStats, EvidenceRecord};

/// Working state of one audit: the responses captured so far, keyed by
/// checklist item, plus the counter used to mint evidence identifiers.
///
/// Sessions enforce the workflow rules. Scores must stay within the item's
/// maximum, evidence must be of a permitted kind, and an item can only be
/// marked complete once every required evidence kind is attached. Responses
/// stay editable after completion; completion is only re-checked when the
/// item is explicitly marked complete again.
#[derive(Debug, Clone)]
pub struct AuditSession {
    catalog: Arc<ChecklistCatalog>,
    responses: BTreeMap<String, AuditItemResponse>,
    evidence_seq: u64,
}

impl AuditSession {
    pub fn new(catalog: Arc<ChecklistCatalog>) -> Self {
        Self {
            catalog,
            responses: BTreeMap::new(),
            evidence_seq: 0,
        }
    }

    /// Rebuilds a session from responses loaded off an audit record.
    pub fn from_responses(
        catalog: Arc<ChecklistCatalog>,
        responses: Vec<AuditItemResponse>,
        evidence_seq: u64,
    ) -> Self {
        let responses = responses
            .into_iter()
            .map(|response| (response.item_id.clone(), response))
            .collect();
        Self {
            catalog,
            responses,
            evidence_seq,
        }
    }

    /// Records a score and/or notes for an item, creating the response on
    /// first touch. A `None` field leaves the current value unchanged.
    pub fn update_response(
        &mut self,
        item_id: &str,
        score: Option<f64>,
        notes: Option<String>,
    ) -> Result<AuditItemResponse, AuditError> {
        let item = self
            .catalog
            .find_item(item_id)
            .ok_or_else(|| AuditError::ItemNotFound(item_id.to_owned()))?;

        if let Some(value) = score {
            let max = item.max_score as f64;
            if !value.is_finite() || value < 0.0 || value > max {
                return Err(AuditError::ScoreOutOfRange {
                    item_id: item_id.to_owned(),
                    score: value,
                    max_score: item.max_score,
                });
            }
        }

        let response = self
            .responses
            .entry(item_id.to_owned())
            .or_insert_with(|| AuditItemResponse::new(item_id));
        if let Some(value) = score {
            response.score = Some(value);
        }
        if let Some(text) = notes {
            response.notes = text;
        }
        Ok(response.clone())
    }

    /// Attaches evidence of a permitted kind and returns the stored record
    /// with its generated identifier.
    pub fn add_evidence(
        &mut self,
        item_id: &str,
        kind: EvidenceKind,
        content: String,
        description: Option<String>,
    ) -> Result<EvidenceRecord, AuditError> {
        let item = self
            .catalog
            .find_item(item_id)
            .ok_or_else(|| AuditError::ItemNotFound(item_id.to_owned()))?;
        if !item.permitted_evidence.contains(&kind) {
            return Err(AuditError::EvidenceNotPermitted {
                item_id: item_id.to_owned(),
                kind,
            });
        }

        self.evidence_seq += 1;
        let record = EvidenceRecord {
            id: format!("{item_id}-{}-{}", kind.label(), self.evidence_seq),
            kind,
            content,
            description,
        };
        let response = self
            .responses
            .entry(item_id.to_owned())
            .or_insert_with(|| AuditItemResponse::new(item_id));
        response.evidence.push(record.clone());
        Ok(record)
    }

    pub fn remove_evidence(&mut self, item_id: &str, evidence_id: &str) -> Result<(), AuditError> {
        self.catalog
            .find_item(item_id)
            .ok_or_else(|| AuditError::ItemNotFound(item_id.to_owned()))?;
        let response = self
            .responses
            .get_mut(item_id)
            .ok_or_else(|| AuditError::EvidenceNotFound {
                item_id: item_id.to_owned(),
                evidence_id: evidence_id.to_owned(),
            })?;
        let position = response
            .evidence
            .iter()
            .position(|record| record.id == evidence_id)
            .ok_or_else(|| AuditError::EvidenceNotFound {
                item_id: item_id.to_owned(),
                evidence_id: evidence_id.to_owned(),
            })?;
        response.evidence.remove(position);
        Ok(())
    }

    pub fn describe_evidence(
        &mut self,
        item_id: &str,
        evidence_id: &str,
        description: String,
    ) -> Result<(), AuditError> {
        self.catalog
            .find_item(item_id)
            .ok_or_else(|| AuditError::ItemNotFound(item_id.to_owned()))?;
        let record = self
            .responses
            .get_mut(item_id)
            .and_then(|response| {
                response
                    .evidence
                    .iter_mut()
                    .find(|record| record.id == evidence_id)
            })
            .ok_or_else(|| AuditError::EvidenceNotFound {
                item_id: item_id.to_owned(),
                evidence_id: evidence_id.to_owned(),
            })?;
        record.description = Some(description);
        Ok(())
    }

    /// Marks an item complete once every required evidence kind is present.
    /// On failure the response is left untouched and the error names each
    /// missing kind.
    pub fn mark_complete(&mut self, item_id: &str) -> Result<CompletionStats, AuditError> {
        let item = self
            .catalog
            .find_item(item_id)
            .ok_or_else(|| AuditError::ItemNotFound(item_id.to_owned()))?;

        let missing: Vec<EvidenceKind> = item
            .required_evidence
            .iter()
            .copied()
            .filter(|kind| {
                !self
                    .responses
                    .get(item_id)
                    .map(|response| response.evidence.iter().any(|record| record.kind == *kind))
                    .unwrap_or(false)
            })
            .collect();
        if !missing.is_empty() {
            return Err(AuditError::MissingRequiredEvidence {
                item_id: item_id.to_owned(),
                missing,
            });
        }

        let response = self
            .responses
            .entry(item_id.to_owned())
            .or_insert_with(|| AuditItemResponse::new(item_id));
        response.completed = true;
        Ok(self.completion())
    }

    pub fn completion(&self) -> CompletionStats {
        CompletionStats {
            completed: self
                .responses
                .values()
                .filter(|response| response.completed)
                .count(),
            total: self.catalog.item_count(),
        }
    }

    /// Responses captured so far, in catalog display order. Items the auditor
    /// has never touched carry no response and are skipped.
    pub fn ordered_responses(&self) -> Vec<AuditItemResponse> {
        self.catalog
            .items()
            .filter_map(|item| self.responses.get(item.id).cloned())
            .collect()
    }

    /// The full ordered response set, released only when every item has been
    /// marked complete.
    pub fn submission(&self) -> Result<Vec<AuditItemResponse>, AuditError> {
        let stats = self.completion();
        if !stats.is_complete() {
            return Err(AuditError::IncompleteAudit {
                completed: stats.completed,
                total: stats.total,
            });
        }
        Ok(self.ordered_responses())
    }

    pub fn response(&self, item_id: &str) -> Option<&AuditItemResponse> {
        self.responses.get(item_id)
    }

    pub fn evidence_seq(&self) -> u64 {
        self.evidence_seq
    }
}
