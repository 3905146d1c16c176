// Library crate for the Evidence Upload System session service
// This file exposes the public API for the binary and integration tests

pub mod audit;
pub mod config;
pub mod official;
pub mod router;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use audit::{AuditLogger, InMemoryAuditRepository};
pub use config::AppConfig;
pub use official::{InMemoryOfficialRepository, OfficialAccount};
pub use router::build_router;
pub use session::{SessionRecord, SessionVerifier, TokenCodec, VerificationOutcome};
pub use shared::{AppError, AppState};
