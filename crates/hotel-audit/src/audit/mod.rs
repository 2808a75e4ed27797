pub mod domain;
pub mod repository;
pub mod router;
mod session;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{AuditError, AuditId, AuditStatus, CompletionStats};
pub use repository::{
    AuditRecord, AuditRepository, PublishError, RepositoryError, ReviewPublisher,
    ReviewSubmission,
};
pub use router::audit_router;
pub use service::{AuditService, AuditServiceError};
pub use session::AuditSession;
