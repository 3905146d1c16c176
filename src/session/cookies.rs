use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};

use crate::config::AppConfig;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE_NAME: &str = "auth-token";

/// Attributes applied to the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Only set in production; local development runs over plain HTTP.
    pub secure: bool,
}

impl CookiePolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            secure: config.is_production,
        }
    }

    /// Builds the cookie that wipes the session on the client
    pub fn clearing_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(AUTH_COOKIE_NAME, "");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Strict);
        cookie.set_max_age(Duration::seconds(0));
        cookie.set_path("/");
        cookie
    }
}

/// Extracts the session token from the request cookies.
pub fn read_auth_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Queues the clearing cookie on the response. Safe to repeat.
pub fn clear_auth_cookie(cookies: &Cookies, policy: CookiePolicy) {
    cookies.add(policy.clearing_cookie());
}
