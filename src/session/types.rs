use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::official::OfficialAccount;

pub const NO_SESSION_MESSAGE: &str = "No session found";
pub const INVALID_SESSION_MESSAGE: &str = "Invalid or expired session";
pub const ACCOUNT_UNAVAILABLE_MESSAGE: &str = "Official not found or inactive";
pub const LOGOUT_SUCCESS_MESSAGE: &str = "Logged out successfully";
pub const LOGOUT_METHOD_MESSAGE: &str = "Method not allowed. Use POST to logout.";

/// Identity snapshot carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub official_id: String,
    pub email: String,
    pub name: String,
    pub department: String,
    pub role: String,
}

/// JWT claims structure: the session record plus the standard time claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    #[serde(flatten)]
    pub record: SessionRecord,
    pub exp: i64, // Expiration timestamp (standard JWT claim)
    pub iat: i64, // Issued at timestamp (standard JWT claim)
}

/// Official block of the session-check response
///
/// Mirrors the live directory entry, minus the activation flag.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficialSummary {
    pub id: String,
    pub email: String,
    pub name: String,
    pub department: String,
    pub role: String,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&OfficialAccount> for OfficialSummary {
    fn from(official: &OfficialAccount) -> Self {
        Self {
            id: official.id.clone(),
            email: official.email.clone(),
            name: official.name.clone(),
            department: official.department.clone(),
            role: official.role.clone(),
            last_login: official.last_login,
        }
    }
}

/// Response structure for the session-check endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionCheckResponse {
    pub success: bool,
    pub session: SessionRecord,
    pub official: OfficialSummary,
}

impl SessionCheckResponse {
    pub fn new(session: SessionRecord, official: &OfficialAccount) -> Self {
        Self {
            success: true,
            session,
            official: OfficialSummary::from(official),
        }
    }
}

/// Response structure for the logout endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

impl LogoutResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            message: LOGOUT_SUCCESS_MESSAGE.to_string(),
        }
    }
}
