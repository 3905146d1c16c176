use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::models::{AuditEvent, NewAuditEvent};
use crate::shared::AppError;

/// Trait for the append-only audit store
///
/// Implementations assign the event id and timestamp at write time and never
/// expose update or delete operations.
#[async_trait]
pub trait AuditRepository {
    async fn append_event(&self, event: NewAuditEvent) -> Result<AuditEvent, AppError>;
}

/// In-memory implementation of AuditRepository for development and testing
pub struct InMemoryAuditRepository {
    events: Mutex<Vec<AuditEvent>>,
}

impl Default for InMemoryAuditRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuditRepository {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every event in write order
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns the events recorded for one official
    pub fn events_for(&self, official_id: &str) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.official_id == official_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    #[instrument(skip(self, event), fields(official_id = %event.official_id, action = %event.action))]
    async fn append_event(&self, event: NewAuditEvent) -> Result<AuditEvent, AppError> {
        let event = AuditEvent::stamp(event);
        self.events.lock().unwrap().push(event.clone());

        debug!(event_id = %event.id, "Audit event appended in memory");
        Ok(event)
    }
}

/// PostgreSQL implementation of the audit store
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    #[instrument(skip(self, event), fields(official_id = %event.official_id, action = %event.action))]
    async fn append_event(&self, event: NewAuditEvent) -> Result<AuditEvent, AppError> {
        let event = sqlx::query_as::<_, AuditEvent>(
            r#"
            INSERT INTO audit_events (id, official_id, email, action, metadata, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, official_id, email, action, metadata, ip_address, user_agent, occurred_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&event.official_id)
        .bind(&event.email)
        .bind(&event.action)
        .bind(&event.metadata)
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to append audit event to database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(event_id = %event.id, "Audit event appended in database");
        Ok(event)
    }
}
