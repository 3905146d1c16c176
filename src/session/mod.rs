// Public API - what other modules can use
pub use handlers::{logout, logout_method_not_allowed, session_check, ClientInfo};
pub use middleware::require_official;
pub use service::{AuthenticatedOfficial, SessionVerifier, VerificationOutcome};
pub use token::TokenCodec;
pub use types::{SessionCheckResponse, SessionClaims, SessionRecord};

// Internal modules
pub mod cookies;
mod handlers;
mod middleware;
pub mod service;
pub mod token;
pub mod types;
