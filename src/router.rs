use axum::{
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::session;
use crate::shared::AppState;

/// Builds the HTTP surface of the service
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/auth/logout",
            post(session::logout).fallback(session::logout_method_not_allowed),
        )
        .route("/api/auth/session", get(session::session_check))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
