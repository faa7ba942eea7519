//! Stored audit runs: submission, lookup and the HTTP surface for dashboards.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{AuditId, AuditRecord, AuditRecordView, AuditRepository, RepositoryError};
pub use router::audit_router;
pub use service::{AuditService, AuditServiceError};
