use serde::Serialize;

use crate::audit::domain::{AuditId, AuditStatus, CompletionStats};

/// Weighted score for one category plus how much of it has been scored.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScoreView {
    pub category_id: &'static str,
    pub name: &'static str,
    pub weight: f64,
    pub score: f64,
    pub items_scored: usize,
    pub items_total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LowScoreItemView {
    pub item_id: &'static str,
    pub title: &'static str,
    pub category_id: &'static str,
    pub score: f64,
    pub max_score: u32,
}

/// Follow-up signals derived from the weighted scores.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_category_score: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub low_scoring_items: Vec<LowScoreItemView>,
    pub observations: Vec<String>,
}

/// Weighted report over an arbitrary set of raw item scores, e.g. an
/// imported score sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub overall_score: f64,
    pub categories: Vec<CategoryScoreView>,
    pub insights: ScoreInsights,
}

/// Score report for a stored audit, including its lifecycle position.
#[derive(Debug, Clone, Serialize)]
pub struct AuditScoreReport {
    pub audit_id: AuditId,
    pub status: AuditStatus,
    pub status_label: &'static str,
    pub completion: CompletionStats,
    pub overall_score: f64,
    pub categories: Vec<CategoryScoreView>,
    pub insights: ScoreInsights,
}
