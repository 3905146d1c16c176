pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{FailingAuditRepository, UnavailableOfficialRepository};
#[allow(unused_imports)]
pub use setup::{official_o1, session_for, TestApp, TestAppBuilder, TestResponse};
