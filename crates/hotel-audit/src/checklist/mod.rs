mod catalog;
pub mod domain;
mod scoring;

pub use catalog::ChecklistCatalog;
pub use scoring::{CategoryScore, ItemScores, ScoreAggregator};
