use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

use evidence_session::{
    audit::{AuditRepository, InMemoryAuditRepository},
    build_router,
    official::{InMemoryOfficialRepository, OfficialAccount, OfficialRepository},
    session::cookies::CookiePolicy,
    AppState, SessionRecord, TokenCodec,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const TEST_SECRET: &[u8] = b"integration-secret-0123456789abcdef";

/// A response with its body already decoded
pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub codec: TokenCodec,
    pub officials: Arc<InMemoryOfficialRepository>,
    pub audit: Arc<InMemoryAuditRepository>,
}

impl TestApp {
    pub fn token_for(&self, record: &SessionRecord) -> String {
        self.codec.encode(record).unwrap()
    }

    pub fn expired_token_for(&self, record: &SessionRecord) -> String {
        self.codec
            .encode_with_ttl(record, chrono::Duration::hours(-2))
            .unwrap()
    }

    pub async fn get_session(&self, token: Option<&str>) -> TestResponse {
        self.send("GET", "/api/auth/session", token).await
    }

    pub async fn post_logout(&self, token: Option<&str>) -> TestResponse {
        self.send("POST", "/api/auth/logout", token).await
    }

    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, "integration-tests/1.0")
            .header("x-forwarded-for", "198.51.100.23");
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("auth-token={}", token));
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }
}

pub struct TestAppBuilder {
    officials: Vec<OfficialAccount>,
    official_repository: Option<Arc<dyn OfficialRepository + Send + Sync>>,
    audit_repository: Option<Arc<dyn AuditRepository + Send + Sync>>,
    secure_cookies: bool,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            officials: vec![],
            official_repository: None,
            audit_repository: None,
            secure_cookies: false,
        }
    }

    pub fn with_official(mut self, official: OfficialAccount) -> Self {
        self.officials.push(official);
        self
    }

    pub fn with_official_repository(
        mut self,
        repo: Arc<dyn OfficialRepository + Send + Sync>,
    ) -> Self {
        self.official_repository = Some(repo);
        self
    }

    pub fn with_audit_repository(mut self, repo: Arc<dyn AuditRepository + Send + Sync>) -> Self {
        self.audit_repository = Some(repo);
        self
    }

    pub fn in_production(mut self) -> Self {
        self.secure_cookies = true;
        self
    }

    pub fn build(self) -> TestApp {
        let codec = TokenCodec::new(TEST_SECRET, chrono::Duration::hours(1));
        let officials = Arc::new(InMemoryOfficialRepository::with_officials(self.officials));
        let audit = Arc::new(InMemoryAuditRepository::new());

        let state = AppState::new(
            codec.clone(),
            self.official_repository
                .unwrap_or_else(|| officials.clone() as Arc<dyn OfficialRepository + Send + Sync>),
            self.audit_repository
                .unwrap_or_else(|| audit.clone() as Arc<dyn AuditRepository + Send + Sync>),
            CookiePolicy {
                secure: self.secure_cookies,
            },
            Duration::from_millis(500),
        );

        TestApp {
            router: build_router(state),
            codec,
            officials,
            audit,
        }
    }
}

pub fn official_o1() -> OfficialAccount {
    OfficialAccount::new("O1", "a@x.com", "A", "D", "R")
}

pub fn session_for(official: &OfficialAccount) -> SessionRecord {
    SessionRecord {
        official_id: official.id.clone(),
        email: official.email.clone(),
        name: official.name.clone(),
        department: official.department.clone(),
        role: official.role.clone(),
    }
}
