use std::collections::BTreeMap;
use std::sync::Arc;

use super::catalog::ChecklistCatalog;
use super::domain::{ChecklistCategory, ChecklistError};

/// Raw item scores keyed by checklist item identifier.
pub type ItemScores = BTreeMap<String, f64>;

/// Per-category result produced by [`ScoreAggregator::category_breakdown`].
#[derive(Debug, Clone)]
pub struct CategoryScore {
    pub category_id: &'static str,
    pub name: &'static str,
    pub weight: f64,
    pub score: f64,
    pub items_scored: usize,
    pub items_total: usize,
}

/// Pure weighted-score calculator over a checklist catalog.
///
/// Each raw score is normalized against its item's maximum and weighted
/// within the category; category results are then rolled up by category
/// weight. Items without a recorded score count as zero. A category whose
/// item weights sum to zero scores zero rather than failing, and the same
/// fallback applies to an overall roll-up with no category weight.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    catalog: Arc<ChecklistCatalog>,
}

impl ScoreAggregator {
    pub fn new(catalog: Arc<ChecklistCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ChecklistCatalog {
        &self.catalog
    }

    /// Weighted 0-100 score for a single category.
    pub fn category_score(
        &self,
        category_id: &str,
        scores: &ItemScores,
    ) -> Result<f64, ChecklistError> {
        let category = self.catalog.category(category_id)?;
        Ok(category_value(category, scores))
    }

    /// Weighted 0-100 score across every category in the catalog.
    pub fn overall_score(&self, scores: &ItemScores) -> f64 {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        for category in self.catalog.categories() {
            weighted += category_value(category, scores) / 100.0 * category.weight;
            total_weight += category.weight;
        }
        if total_weight > 0.0 {
            weighted / total_weight * 100.0
        } else {
            0.0
        }
    }

    /// Category scores in catalog display order.
    pub fn category_breakdown(&self, scores: &ItemScores) -> Vec<CategoryScore> {
        self.catalog
            .categories()
            .iter()
            .map(|category| CategoryScore {
                category_id: category.id,
                name: category.name,
                weight: category.weight,
                score: category_value(category, scores),
                items_scored: category
                    .items
                    .iter()
                    .filter(|item| scores.contains_key(item.id))
                    .count(),
                items_total: category.items.len(),
            })
            .collect()
    }
}

fn category_value(category: &ChecklistCategory, scores: &ItemScores) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for item in &category.items {
        let raw = scores.get(item.id).copied().unwrap_or(0.0);
        weighted += raw / item.max_score as f64 * item.weight;
        total_weight += item.weight;
    }
    if total_weight > 0.0 {
        weighted / total_weight * 100.0
    } else {
        0.0
    }
}
