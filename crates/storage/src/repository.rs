use async_trait::async_trait;
use prep_core::model::{ActivityLog, PlanOverrides};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted activity log snapshot.
///
/// `load_log` returns `Ok(None)` when no snapshot exists; backends treat a
/// corrupt snapshot the same way rather than failing the load.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Fetch the persisted log, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached at all.
    async fn load_log(&self) -> Result<Option<ActivityLog>, StorageError>;

    /// Persist the full log snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_log(&self, log: &ActivityLog) -> Result<(), StorageError>;
}

/// Repository contract for plan overrides, kept in a separate namespace from
/// the activity log.
#[async_trait]
pub trait PlanOverridesRepository: Send + Sync {
    /// Fetch persisted overrides, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached at all.
    async fn load_overrides(&self) -> Result<Option<PlanOverrides>, StorageError>;

    /// Persist the overrides document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    async fn save_overrides(&self, overrides: &PlanOverrides) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    log: Arc<Mutex<Option<ActivityLog>>>,
    overrides: Arc<Mutex<Option<PlanOverrides>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryRepository {
    async fn load_log(&self) -> Result<Option<ActivityLog>, StorageError> {
        let guard = self.log.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_log(&self, log: &ActivityLog) -> Result<(), StorageError> {
        let mut guard = self.log.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(log.clone());
        Ok(())
    }
}

#[async_trait]
impl PlanOverridesRepository for InMemoryRepository {
    async fn load_overrides(&self) -> Result<Option<PlanOverrides>, StorageError> {
        let guard = self
            .overrides
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_overrides(&self, overrides: &PlanOverrides) -> Result<(), StorageError> {
        let mut guard = self
            .overrides
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = Some(overrides.clone());
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub logs: Arc<dyn ActivityLogRepository>,
    pub overrides: Arc<dyn PlanOverridesRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let logs: Arc<dyn ActivityLogRepository> = Arc::new(repo.clone());
        let overrides: Arc<dyn PlanOverridesRepository> = Arc::new(repo);
        Self { logs, overrides }
    }
}
