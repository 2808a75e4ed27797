use crate::infra::{parse_date, InMemoryAuditRepository, InMemoryReviewPublisher};
use chrono::{Local, NaiveDate};
use clap::Args;
use hotel_audit::audit::{AuditId, AuditRepository, AuditService, AuditServiceError};
use hotel_audit::checklist::{ChecklistCatalog, ScoreAggregator};
use hotel_audit::error::AppError;
use hotel_audit::import::ScoreSheetImporter;
use hotel_audit::report;
use hotel_audit::report::views::{AuditScoreReport, CategoryScoreView, ScoreInsights, ScoreReport};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreReportArgs {
    /// CSV score sheet with `Item ID,Score` columns
    #[arg(long)]
    pub(crate) scores_csv: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Audit opening date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) opened_on: Option<NaiveDate>,
    /// Property the scripted audit walks through.
    #[arg(long, default_value = "Taj Mahal Palace")]
    pub(crate) property: String,
    /// Auditor recorded on the scripted audit.
    #[arg(long, default_value = "Meera Iyer")]
    pub(crate) auditor: String,
}

pub(crate) fn run_score_report(args: ScoreReportArgs) -> Result<(), AppError> {
    let ScoreReportArgs { scores_csv, json } = args;

    let catalog = Arc::new(ChecklistCatalog::standard());
    let scores = ScoreSheetImporter::from_path(&scores_csv, &catalog)?;
    let aggregator = ScoreAggregator::new(catalog);
    let report = report::score_report(&aggregator, &scores);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{}", payload),
            Err(err) => println!("Report could not be rendered as JSON: {}", err),
        }
        return Ok(());
    }

    println!("Score sheet: {}", scores_csv.display());
    render_score_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        opened_on,
        property,
        auditor,
    } = args;

    let opened_on = opened_on.unwrap_or_else(|| Local::now().date_naive());

    println!("Hotel audit walkthrough");
    let catalog = Arc::new(ChecklistCatalog::standard());
    let repository = Arc::new(InMemoryAuditRepository::default());
    let reviews = Arc::new(InMemoryReviewPublisher::default());
    let service = AuditService::new(catalog.clone(), repository.clone(), reviews.clone());

    let record = match service.open(property, auditor, opened_on) {
        Ok(record) => record,
        Err(err) => {
            println!("  Could not open the audit: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Opened audit {} for {} on {} ({} checklist items)",
        record.audit_id,
        record.property,
        record.opened_on,
        catalog.item_count()
    );

    // Both gates fire before any field work has happened.
    if let Err(err) = service.submit(&record.audit_id, opened_on) {
        println!("\nSubmitting right away fails: {}", err);
    }
    if let Err(err) = service.complete_item(&record.audit_id, "room-cleanliness") {
        println!("Completing without evidence fails: {}", err);
    }

    println!("\nWorking through the checklist");
    if let Err(err) = drive_checklist(&service, &record.audit_id, &catalog) {
        println!("  Demo aborted: {}", err);
        return Ok(());
    }

    let current = match service.get(&record.audit_id) {
        Ok(record) => record,
        Err(err) => {
            println!("  Audit lookup failed: {}", err);
            return Ok(());
        }
    };
    let completion = current.completion(catalog.item_count());
    println!(
        "- {} of {} items complete ({:.0}%)",
        completion.completed,
        completion.total,
        completion.percentage()
    );

    match service.score_report(&record.audit_id) {
        Ok(score_report) => {
            println!("\nPre-submission report");
            render_audit_report(&score_report);
        }
        Err(err) => println!("  Score report unavailable: {}", err),
    }

    let submission = match service.submit(&record.audit_id, Local::now().date_naive()) {
        Ok(submission) => submission,
        Err(err) => {
            println!("  Submission failed: {}", err);
            return Ok(());
        }
    };
    println!(
        "\nSubmitted audit {} on {} with {} item responses",
        submission.audit_id,
        submission.submitted_on,
        submission.items.len()
    );

    if let Err(err) = service.update_item(&record.audit_id, "valet-greeting", Some(1.0), None) {
        println!("Editing after submission fails: {}", err);
    }

    let queued = reviews.submissions();
    println!("\nReview queue holds {} submission(s)", queued.len());
    if let Some(first) = queued.first() {
        for item in first.items.iter().take(3) {
            let score = item
                .score
                .map(|value| format!("{value:.0}"))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  - {} scored {} with {} evidence record(s)",
                item.item_id,
                score,
                item.evidence.len()
            );
        }
    }

    match repository.submitted(5) {
        Ok(roster) => {
            println!("\nSubmitted audits on file: {}", roster.len());
            for stored in &roster {
                let submitted_on = stored
                    .submitted_on
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("  - {} at {} on {}", stored.audit_id, stored.property, submitted_on);
            }
        }
        Err(err) => println!("  Stored submissions unavailable: {}", err),
    }

    Ok(())
}

/// Scores, evidences, and completes every catalog item, with each category
/// landing near a scripted fraction of its maximum.
fn drive_checklist(
    service: &AuditService<InMemoryAuditRepository, InMemoryReviewPublisher>,
    audit_id: &AuditId,
    catalog: &ChecklistCatalog,
) -> Result<(), AuditServiceError> {
    for category in catalog.categories() {
        let factor = demo_factor(category.id);
        println!(
            "- {} (scored around {:.0}% of maximum)",
            category.name,
            factor * 100.0
        );
        for item in &category.items {
            let score = (f64::from(item.max_score) * factor).round();
            service.update_item(
                audit_id,
                item.id,
                Some(score),
                Some(format!("Checked: {}", item.title)),
            )?;
            for kind in &item.required_evidence {
                service.add_evidence(
                    audit_id,
                    item.id,
                    *kind,
                    format!("field-notes/{}.{}", item.id, kind.label()),
                    None,
                )?;
            }
            service.complete_item(audit_id, item.id)?;
        }
    }

    Ok(())
}

fn demo_factor(category_id: &str) -> f64 {
    match category_id {
        "arrival-checkin" => 0.9,
        "room-experience" => 0.85,
        "dining-experience" => 0.4,
        "staff-interaction" => 0.8,
        _ => 0.95,
    }
}

fn render_score_report(report: &ScoreReport) {
    println!("Weighted audit score: {:.1}%", report.overall_score);
    render_breakdown(&report.categories, &report.insights);
}

fn render_audit_report(report: &AuditScoreReport) {
    println!(
        "Audit {} ({}) | {} of {} items complete",
        report.audit_id, report.status_label, report.completion.completed, report.completion.total
    );
    println!("Weighted audit score: {:.1}%", report.overall_score);
    render_breakdown(&report.categories, &report.insights);
}

fn render_breakdown(categories: &[CategoryScoreView], insights: &ScoreInsights) {
    println!("\nCategory breakdown");
    for category in categories {
        println!(
            "- {}: {:.1}% ({} of {} items scored, weight {:.2})",
            category.name,
            category.score,
            category.items_scored,
            category.items_total,
            category.weight
        );
    }

    if let (Some(name), Some(score)) = (insights.weakest_category, insights.weakest_category_score)
    {
        println!("\nWeakest category: {} at {:.1}%", name, score);
    }

    if !insights.low_scoring_items.is_empty() {
        println!("\nItems below half their maximum");
        for item in &insights.low_scoring_items {
            println!(
                "- {} ({}): {:.1} of {}",
                item.title, item.item_id, item.score, item.max_score
            );
        }
    }

    if !insights.observations.is_empty() {
        println!("\nObservations");
        for note in &insights.observations {
            println!("- {}", note);
        }
    }
}
