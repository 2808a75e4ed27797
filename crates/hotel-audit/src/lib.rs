pub mod audit;
pub mod checklist;
pub mod config;
pub mod error;
pub mod import;
pub mod report;
pub mod telemetry;
