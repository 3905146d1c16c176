use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the officials directory
///
/// Reflects the current state of the account, which may have drifted from the
/// snapshot carried inside a session token.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfficialAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub department: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl OfficialAccount {
    /// Creates an active account that has never logged in
    pub fn new(id: &str, email: &str, name: &str, department: &str, role: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            department: department.to_string(),
            role: role.to_string(),
            is_active: true,
            last_login: None,
        }
    }

    pub fn with_last_login(mut self, last_login: DateTime<Utc>) -> Self {
        self.last_login = Some(last_login);
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
