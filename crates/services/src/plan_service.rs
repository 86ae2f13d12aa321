use std::sync::Arc;

use prep_core::model::{PlanOverrides, StudyPlan};
use storage::repository::PlanOverridesRepository;

use crate::error::PlanServiceError;

/// The configuration surface: default plan plus persisted overrides.
#[derive(Clone)]
pub struct StudyPlanService {
    repo: Arc<dyn PlanOverridesRepository>,
}

impl StudyPlanService {
    #[must_use]
    pub fn new(repo: Arc<dyn PlanOverridesRepository>) -> Self {
        Self { repo }
    }

    /// The effective plan: defaults with any persisted overrides applied.
    ///
    /// Missing, corrupt, or unreadable overrides degrade to the defaults;
    /// loading never fails.
    pub async fn load(&self) -> StudyPlan {
        match self.repo.load_overrides().await {
            Ok(Some(overrides)) => StudyPlan::default().with_overrides(&overrides),
            Ok(None) | Err(_) => StudyPlan::default(),
        }
    }

    /// Validate and persist new overrides, returning the effective plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Plan` if validation fails, or
    /// `PlanServiceError::Storage` if persistence fails.
    pub async fn save_overrides(
        &self,
        overrides: PlanOverrides,
    ) -> Result<StudyPlan, PlanServiceError> {
        overrides.validate()?;
        self.repo.save_overrides(&overrides).await?;
        Ok(StudyPlan::default().with_overrides(&overrides))
    }
}
