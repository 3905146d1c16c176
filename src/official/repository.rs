use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::OfficialAccount;
use crate::shared::AppError;

/// Trait for official directory lookups
#[async_trait]
pub trait OfficialRepository {
    async fn get_official_by_id(
        &self,
        official_id: &str,
    ) -> Result<Option<OfficialAccount>, AppError>;
}

/// In-memory implementation of OfficialRepository for development and testing
///
/// Accounts can be edited or deactivated at runtime, which makes it possible to
/// exercise revocation without a database.
pub struct InMemoryOfficialRepository {
    officials: Mutex<HashMap<String, OfficialAccount>>,
}

impl Default for InMemoryOfficialRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOfficialRepository {
    /// Creates a new empty in-memory directory
    pub fn new() -> Self {
        Self {
            officials: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory directory with pre-populated accounts
    pub fn with_officials(officials: Vec<OfficialAccount>) -> Self {
        let official_map = officials
            .into_iter()
            .map(|official| (official.id.clone(), official))
            .collect();

        Self {
            officials: Mutex::new(official_map),
        }
    }

    /// Inserts or replaces an account
    pub fn upsert_official(&self, official: OfficialAccount) {
        self.officials
            .lock()
            .unwrap()
            .insert(official.id.clone(), official);
    }

    /// Flips the active flag of an account, returning false if it does not exist
    pub fn set_active(&self, official_id: &str, is_active: bool) -> bool {
        match self.officials.lock().unwrap().get_mut(official_id) {
            Some(official) => {
                official.is_active = is_active;
                true
            }
            None => false,
        }
    }

    /// Removes an account, returning false if it did not exist
    pub fn remove_official(&self, official_id: &str) -> bool {
        self.officials.lock().unwrap().remove(official_id).is_some()
    }

    pub fn official_count(&self) -> usize {
        self.officials.lock().unwrap().len()
    }
}

#[async_trait]
impl OfficialRepository for InMemoryOfficialRepository {
    #[instrument(skip(self))]
    async fn get_official_by_id(
        &self,
        official_id: &str,
    ) -> Result<Option<OfficialAccount>, AppError> {
        debug!(official_id = %official_id, "Fetching official from memory");

        let official = self.officials.lock().unwrap().get(official_id).cloned();

        match &official {
            Some(o) => debug!(official_id = %official_id, is_active = o.is_active, "Official found in memory"),
            None => debug!(official_id = %official_id, "Official not found in memory"),
        }

        Ok(official)
    }
}

/// PostgreSQL implementation of the official directory
pub struct PostgresOfficialRepository {
    pool: PgPool,
}

impl PostgresOfficialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficialRepository for PostgresOfficialRepository {
    #[instrument(skip(self))]
    async fn get_official_by_id(
        &self,
        official_id: &str,
    ) -> Result<Option<OfficialAccount>, AppError> {
        debug!(official_id = %official_id, "Fetching official from database");

        let official = sqlx::query_as::<_, OfficialAccount>(
            "SELECT id, email, name, department, role, is_active, last_login FROM officials WHERE id = $1",
        )
        .bind(official_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, official_id = %official_id, "Failed to fetch official from database");
            AppError::DatabaseError(e.to_string())
        })?;

        match &official {
            Some(o) => debug!(official_id = %official_id, is_active = o.is_active, "Official found in database"),
            None => debug!(official_id = %official_id, "Official not found in database"),
        }

        Ok(official)
    }
}
