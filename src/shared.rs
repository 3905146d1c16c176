use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

use crate::audit::{repository::AuditRepository, AuditLogger};
use crate::config::AppConfig;
use crate::official::repository::OfficialRepository;
use crate::session::{cookies::CookiePolicy, service::SessionVerifier, token::TokenCodec};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_verifier: Arc<SessionVerifier>,
    pub audit_logger: AuditLogger,
    pub cookie_policy: CookiePolicy,
}

impl AppState {
    pub fn new(
        token_codec: TokenCodec,
        official_repository: Arc<dyn OfficialRepository + Send + Sync>,
        audit_repository: Arc<dyn AuditRepository + Send + Sync>,
        cookie_policy: CookiePolicy,
        audit_write_timeout: Duration,
    ) -> Self {
        Self {
            session_verifier: Arc::new(SessionVerifier::new(token_codec, official_repository)),
            audit_logger: AuditLogger::new(audit_repository, audit_write_timeout),
            cookie_policy,
        }
    }

    /// Wires the state from loaded configuration and the chosen stores
    pub fn from_config(
        config: &AppConfig,
        official_repository: Arc<dyn OfficialRepository + Send + Sync>,
        audit_repository: Arc<dyn AuditRepository + Send + Sync>,
    ) -> Self {
        Self::new(
            TokenCodec::from_config(config),
            official_repository,
            audit_repository,
            CookiePolicy::from_config(config),
            config.audit_write_timeout,
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            AppError::JwtError(msg) => {
                error!(error = %msg, "Session token encoding failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::DatabaseError(msg) => {
                error!(error = %msg, "Store failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => {
                error!("Unexpected internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
