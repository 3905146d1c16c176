// Public API - what other modules can use
pub use logger::AuditLogger;
pub use models::{AuditAction, AuditContext, AuditEvent, NewAuditEvent};
pub use repository::{AuditRepository, InMemoryAuditRepository, PostgresAuditRepository};

mod logger;
pub mod models;
pub mod repository;
