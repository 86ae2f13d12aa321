use std::path::PathBuf;
use std::sync::Arc;

use prep_core::Clock;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::plan_service::StudyPlanService;
use crate::tracker_service::TrackerService;

/// Assembles the service handles the UI consumes.
#[derive(Clone)]
pub struct AppServices {
    tracker: Arc<TrackerService>,
    plans: Arc<StudyPlanService>,
}

impl AppServices {
    /// Build services over in-memory storage (tests, prototyping).
    pub async fn in_memory(clock: Clock) -> Self {
        Self::from_storage(clock, Storage::in_memory()).await
    }

    /// Build services backed by JSON documents in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the data directory cannot be created.
    pub async fn json_dir(
        dir: impl Into<PathBuf>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::json_dir(dir).await?;
        Ok(Self::from_storage(clock, storage).await)
    }

    async fn from_storage(clock: Clock, storage: Storage) -> Self {
        let tracker = Arc::new(TrackerService::load(clock, Arc::clone(&storage.logs)).await);
        let plans = Arc::new(StudyPlanService::new(Arc::clone(&storage.overrides)));
        Self { tracker, plans }
    }

    #[must_use]
    pub fn tracker(&self) -> Arc<TrackerService> {
        Arc::clone(&self.tracker)
    }

    #[must_use]
    pub fn plans(&self) -> Arc<StudyPlanService> {
        Arc::clone(&self.plans)
    }
}
