//! JSON-document backend on the local filesystem.
//!
//! Two documents in one data directory: `activities.json` (the log snapshot)
//! and `settings.json` (plan overrides). Writes go through a temp file and a
//! rename so a crash mid-write leaves the previous snapshot intact; at most
//! the latest write is lost.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs;

use crate::record::{self, LogDocument, OverridesRecord};
use crate::repository::{ActivityLogRepository, PlanOverridesRepository, Storage, StorageError};
use prep_core::model::{ActivityLog, PlanOverrides};

const ACTIVITIES_FILE: &str = "activities.json";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonInitError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Store rooted at a data directory.
#[derive(Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `JsonInitError` if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, JsonInitError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read and decode a document; a missing or malformed document is `None`.
    async fn read_document<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let bytes = fs::read(self.path(name)).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    async fn write_document<T: Serialize>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let tmp = self.path(&format!("{name}.tmp"));
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, self.path(name))
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ActivityLogRepository for JsonStore {
    async fn load_log(&self) -> Result<Option<ActivityLog>, StorageError> {
        let Some(document) = self.read_document::<LogDocument>(ACTIVITIES_FILE).await else {
            return Ok(None);
        };
        Ok(Some(record::log_from_document(document)))
    }

    async fn save_log(&self, log: &ActivityLog) -> Result<(), StorageError> {
        self.write_document(ACTIVITIES_FILE, &record::document_from_log(log))
            .await
    }
}

#[async_trait]
impl PlanOverridesRepository for JsonStore {
    async fn load_overrides(&self) -> Result<Option<PlanOverrides>, StorageError> {
        let Some(record) = self.read_document::<OverridesRecord>(SETTINGS_FILE).await else {
            return Ok(None);
        };
        Ok(Some(record.into_overrides()))
    }

    async fn save_overrides(&self, overrides: &PlanOverrides) -> Result<(), StorageError> {
        self.write_document(SETTINGS_FILE, &OverridesRecord::from_overrides(overrides))
            .await
    }
}

impl Storage {
    /// Build a `Storage` backed by JSON documents in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `JsonInitError` if the data directory cannot be created.
    pub async fn json_dir(dir: impl Into<PathBuf>) -> Result<Self, JsonInitError> {
        let store = JsonStore::open(dir).await?;
        let logs: Arc<dyn ActivityLogRepository> = Arc::new(store.clone());
        let overrides: Arc<dyn PlanOverridesRepository> = Arc::new(store);
        Ok(Self { logs, overrides })
    }
}
