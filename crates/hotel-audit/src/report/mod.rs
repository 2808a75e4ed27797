mod insights;
mod summary;
pub mod views;

pub use summary::{audit_score_report, score_report};
