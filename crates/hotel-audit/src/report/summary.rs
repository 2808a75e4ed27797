use crate::audit::repository::AuditRecord;
use crate::checklist::{ItemScores, ScoreAggregator};

use super::insights;
use super::views::{AuditScoreReport, CategoryScoreView, ScoreReport};

/// Builds the weighted report for an arbitrary set of raw item scores.
pub fn score_report(aggregator: &ScoreAggregator, scores: &ItemScores) -> ScoreReport {
    let categories: Vec<CategoryScoreView> = aggregator
        .category_breakdown(scores)
        .into_iter()
        .map(|entry| CategoryScoreView {
            category_id: entry.category_id,
            name: entry.name,
            weight: entry.weight,
            score: entry.score,
            items_scored: entry.items_scored,
            items_total: entry.items_total,
        })
        .collect();
    let insights = insights::generate(aggregator.catalog(), scores, &categories);
    ScoreReport {
        overall_score: aggregator.overall_score(scores),
        categories,
        insights,
    }
}

/// Builds the report for a stored audit from the scores its auditor has
/// recorded so far. Unscored items count as zero, matching live dashboards.
pub fn audit_score_report(aggregator: &ScoreAggregator, record: &AuditRecord) -> AuditScoreReport {
    let scores: ItemScores = record
        .responses
        .iter()
        .filter_map(|response| response.score.map(|value| (response.item_id.clone(), value)))
        .collect();
    let report = score_report(aggregator, &scores);
    AuditScoreReport {
        audit_id: record.audit_id.clone(),
        status: record.status,
        status_label: record.status.label(),
        completion: record.completion(aggregator.catalog().item_count()),
        overall_score: report.overall_score,
        categories: report.categories,
        insights: report.insights,
    }
}
