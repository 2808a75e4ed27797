use crate::checklist::{ChecklistCatalog, ItemScores};

use super::views::{CategoryScoreView, LowScoreItemView, ScoreInsights};

/// Items below this share of their maximum get flagged for follow-up.
const LOW_SCORE_RATIO: f64 = 0.5;

pub(crate) fn generate(
    catalog: &ChecklistCatalog,
    scores: &ItemScores,
    categories: &[CategoryScoreView],
) -> ScoreInsights {
    if scores.is_empty() {
        return ScoreInsights {
            weakest_category: None,
            weakest_category_score: None,
            low_scoring_items: Vec::new(),
            observations: vec!["No items scored yet".to_owned()],
        };
    }

    let weakest = categories
        .iter()
        .filter(|entry| entry.items_total > 0)
        .min_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let low_scoring_items: Vec<LowScoreItemView> = catalog
        .items()
        .filter_map(|item| {
            let raw = scores.get(item.id).copied()?;
            (raw < item.max_score as f64 * LOW_SCORE_RATIO).then(|| LowScoreItemView {
                item_id: item.id,
                title: item.title,
                category_id: item.category,
                score: raw,
                max_score: item.max_score,
            })
        })
        .collect();

    let mut observations = Vec::new();
    if let Some(entry) = weakest {
        observations.push(format!(
            "{} is the weakest category at {:.0}%",
            entry.name, entry.score
        ));
    }
    if !low_scoring_items.is_empty() {
        observations.push(format!(
            "{} item(s) scored below half of their maximum",
            low_scoring_items.len()
        ));
    }

    ScoreInsights {
        weakest_category: weakest.map(|entry| entry.name),
        weakest_category_score: weakest.map(|entry| entry.score),
        low_scoring_items,
        observations,
    }
}
