use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{
    models::{AuditAction, AuditContext, NewAuditEvent},
    repository::AuditRepository,
};

/// Best-effort front for the audit store
///
/// `record` never fails: write errors and timeouts are reported on the `audit`
/// tracing target and the caller carries on.
#[derive(Clone)]
pub struct AuditLogger {
    repository: Arc<dyn AuditRepository + Send + Sync>,
    write_timeout: Duration,
}

impl AuditLogger {
    pub fn new(repository: Arc<dyn AuditRepository + Send + Sync>, write_timeout: Duration) -> Self {
        Self {
            repository,
            write_timeout,
        }
    }

    #[instrument(skip(self, email, context))]
    pub async fn record(
        &self,
        official_id: &str,
        email: &str,
        action: AuditAction,
        context: AuditContext,
    ) {
        let event = NewAuditEvent::new(official_id, email, action, context);

        match tokio::time::timeout(self.write_timeout, self.repository.append_event(event)).await {
            Ok(Ok(event)) => {
                debug!(event_id = %event.id, action = %event.action, "Audit event recorded");
            }
            Ok(Err(e)) => {
                error!(
                    target: "audit",
                    official_id = %official_id,
                    action = %action,
                    error = %e,
                    "Failed to record audit event"
                );
            }
            Err(_) => {
                error!(
                    target: "audit",
                    official_id = %official_id,
                    action = %action,
                    timeout_ms = self.write_timeout.as_millis() as u64,
                    "Audit write timed out"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{
        models::AuditEvent,
        repository::{AuditRepository, InMemoryAuditRepository},
    };
    use crate::shared::AppError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingAuditRepository;

    #[async_trait]
    impl AuditRepository for FailingAuditRepository {
        async fn append_event(&self, _event: NewAuditEvent) -> Result<AuditEvent, AppError> {
            Err(AppError::DatabaseError("audit store offline".to_string()))
        }
    }

    struct StalledAuditRepository;

    #[async_trait]
    impl AuditRepository for StalledAuditRepository {
        async fn append_event(&self, event: NewAuditEvent) -> Result<AuditEvent, AppError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(AuditEvent::stamp(event))
        }
    }

    fn context() -> AuditContext {
        AuditContext {
            metadata: json!({ "success": true }),
            ip_address: "192.0.2.10".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_appends_event() {
        let repo = Arc::new(InMemoryAuditRepository::new());
        let logger = AuditLogger::new(repo.clone(), Duration::from_secs(1));

        logger
            .record("O1", "a@x.com", AuditAction::Logout, context())
            .await;

        let events = repo.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].official_id, "O1");
        assert_eq!(events[0].email, "a@x.com");
        assert_eq!(events[0].action, "logout");
        assert_eq!(events[0].metadata, json!({ "success": true }));
        assert_eq!(events[0].ip_address, "192.0.2.10");
        assert_eq!(events[0].user_agent, "Mozilla/5.0");
    }

    #[tokio::test]
    async fn test_record_swallows_store_failure() {
        let logger = AuditLogger::new(Arc::new(FailingAuditRepository), Duration::from_secs(1));

        logger
            .record("O1", "a@x.com", AuditAction::Logout, context())
            .await;
    }

    #[tokio::test]
    async fn test_record_gives_up_after_timeout() {
        let logger = AuditLogger::new(
            Arc::new(StalledAuditRepository),
            Duration::from_millis(20),
        );

        let started = std::time::Instant::now();
        logger
            .record("O1", "a@x.com", AuditAction::Logout, context())
            .await;

        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
