use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use strum_macros::{AsRefStr, Display};
use uuid::Uuid;

/// Security-relevant actions recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum AuditAction {
    Logout,
}

/// Request-scoped details attached to an audit event
#[derive(Debug, Clone, PartialEq)]
pub struct AuditContext {
    pub metadata: Value,
    pub ip_address: String,
    pub user_agent: String,
}

/// An audit event before the store has assigned its identity and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEvent {
    pub official_id: String,
    pub email: String,
    pub action: String,
    pub metadata: Value,
    pub ip_address: String,
    pub user_agent: String,
}

impl NewAuditEvent {
    pub fn new(official_id: &str, email: &str, action: AuditAction, context: AuditContext) -> Self {
        Self {
            official_id: official_id.to_string(),
            email: email.to_string(),
            action: action.to_string(),
            metadata: context.metadata,
            ip_address: context.ip_address,
            user_agent: context.user_agent,
        }
    }
}

/// Database model for the append-only audit_events table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub id: Uuid,
    pub official_id: String,
    pub email: String,
    pub action: String,
    pub metadata: Value,
    pub ip_address: String,
    pub user_agent: String,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Stamps a pending event with a fresh id and the current time
    pub fn stamp(event: NewAuditEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            official_id: event.official_id,
            email: event.email,
            action: event.action,
            metadata: event.metadata,
            ip_address: event.ip_address,
            user_agent: event.user_agent,
            occurred_at: Utc::now(),
        }
    }
}
