use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{header::USER_AGENT, request::Parts, HeaderMap},
    Json,
};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use tower_cookies::Cookies;
use tracing::{debug, error, info, instrument};

use super::{
    cookies::{clear_auth_cookie, read_auth_token},
    service::VerificationOutcome,
    types::{LogoutResponse, SessionCheckResponse, LOGOUT_METHOD_MESSAGE},
};
use crate::{
    audit::{AuditAction, AuditContext},
    shared::{AppError, AppState},
};

const UNKNOWN: &str = "unknown";

/// Caller details recorded alongside audit events
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientInfo {
    fn from_parts(parts: &Parts) -> Self {
        let ip_address = forwarded_ip(&parts.headers)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| UNKNOWN.to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();

        Self {
            ip_address,
            user_agent,
        }
    }
}

/// First hop of `x-forwarded-for`, falling back to `x-real-ip`
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    header_value("x-forwarded-for")
        .and_then(|value| value.split(',').next().map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_value("x-real-ip").map(|ip| ip.trim().to_string()))
        .filter(|ip| !ip.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// HTTP handler for ending a session
///
/// POST /api/auth/logout
/// Always clears the auth cookie; an audit event is written only when the
/// presented token belonged to a live session.
#[instrument(name = "logout", skip(state, cookies))]
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    client: ClientInfo,
) -> Result<Json<LogoutResponse>, AppError> {
    let token = read_auth_token(&cookies);
    clear_auth_cookie(&cookies, state.cookie_policy);

    let outcome = state
        .session_verifier
        .verify_request(token.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Logout failed while verifying session");
            e
        })?;

    match outcome {
        VerificationOutcome::Authenticated(authenticated) => {
            let session = authenticated.session;
            state
                .audit_logger
                .record(
                    &session.official_id,
                    &session.email,
                    AuditAction::Logout,
                    AuditContext {
                        metadata: json!({ "success": true }),
                        ip_address: client.ip_address,
                        user_agent: client.user_agent,
                    },
                )
                .await;

            info!(official_id = %session.official_id, "Official logged out");
        }
        other => {
            debug!(outcome = ?other, "Logout without a live session");
        }
    }

    Ok(Json(LogoutResponse::success()))
}

/// Any method other than POST on the logout route
pub async fn logout_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed(LOGOUT_METHOD_MESSAGE.to_string())
}

/// HTTP handler reporting who the current session belongs to
///
/// GET /api/auth/session
#[instrument(name = "session_check", skip(state, cookies))]
pub async fn session_check(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<SessionCheckResponse>, AppError> {
    let token = read_auth_token(&cookies);

    let outcome = state
        .session_verifier
        .verify_request(token.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "Session check failed while verifying session");
            e
        })?;

    let authenticated = outcome.into_authenticated()?;

    debug!(official_id = %authenticated.official.id, "Session check succeeded");

    Ok(Json(SessionCheckResponse::new(
        authenticated.session,
        &authenticated.official,
    )))
}
