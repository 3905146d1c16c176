use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use evidence_session::{
    audit::{AuditEvent, AuditRepository, NewAuditEvent},
    official::{OfficialAccount, OfficialRepository},
    AppError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Audit store that rejects every write and counts the attempts
#[derive(Default)]
pub struct FailingAuditRepository {
    attempts: AtomicUsize,
}

impl FailingAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn append_event(&self, _event: NewAuditEvent) -> Result<AuditEvent, AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DatabaseError("audit store offline".to_string()))
    }
}

/// Official directory whose backing store is unreachable
pub struct UnavailableOfficialRepository;

#[async_trait]
impl OfficialRepository for UnavailableOfficialRepository {
    async fn get_official_by_id(
        &self,
        _official_id: &str,
    ) -> Result<Option<OfficialAccount>, AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }
}
