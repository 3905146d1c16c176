use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;
use tracing::{debug, info, instrument};

use super::cookies::read_auth_token;
use crate::shared::{AppError, AppState};

/// Session guard middleware - verifies the auth-token cookie and adds
/// AuthenticatedOfficial to the request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), session::require_official))
/// Handlers can then extract Extension(official): Extension<AuthenticatedOfficial>.
#[instrument(skip(state, cookies, req, next))]
pub async fn require_official(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = read_auth_token(&cookies);

    let authenticated = match state
        .session_verifier
        .verify_request(token.as_deref())
        .await?
        .into_authenticated()
    {
        Ok(authenticated) => authenticated,
        Err(e) => {
            info!(uri = %req.uri(), "Rejected request without a live session: {}", e);
            return Err(e);
        }
    };

    debug!(
        official_id = %authenticated.official.id,
        role = %authenticated.official.role,
        "Session guard passed, adding official to request"
    );

    req.extensions_mut().insert(authenticated);

    Ok(next.run(req).await)
}
