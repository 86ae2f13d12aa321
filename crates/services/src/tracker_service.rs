use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prep_core::Clock;
use prep_core::model::{Activity, ActivityDraft, ActivityLog, StudyDate, StudyPlan, Subject};
use prep_core::progress::{self, SubjectProgress};
use storage::repository::ActivityLogRepository;

use crate::error::TrackerServiceError;

/// Owns the canonical activity log and keeps the persisted snapshot in step.
///
/// All reads and writes of the log funnel through here; nothing else touches
/// storage directly. Each mutation updates the in-memory log first and then
/// persists the result before returning, so the durable snapshot reflects
/// every accepted mutation. A persistence failure comes back as an `Err`, but
/// the in-memory mutation stands and later mutations are still accepted.
pub struct TrackerService {
    clock: Clock,
    repo: Arc<dyn ActivityLogRepository>,
    log: Mutex<ActivityLog>,
}

impl TrackerService {
    /// Load the persisted snapshot, or start empty.
    ///
    /// A missing, corrupt, or unreadable snapshot degrades to an empty log;
    /// loading never fails.
    pub async fn load(clock: Clock, repo: Arc<dyn ActivityLogRepository>) -> Self {
        let log = match repo.load_log().await {
            Ok(Some(log)) => log,
            Ok(None) | Err(_) => ActivityLog::new(),
        };
        Self {
            clock,
            repo,
            log: Mutex::new(log),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ActivityLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current log.
    #[must_use]
    pub fn snapshot(&self) -> ActivityLog {
        self.lock().clone()
    }

    /// Entries recorded on `date`, in submission order. Returns owned copies;
    /// mutating them cannot touch the log.
    #[must_use]
    pub fn activities_for(&self, date: StudyDate) -> Vec<Activity> {
        self.lock().for_date(date).to_vec()
    }

    /// Validate a form submission and record it.
    ///
    /// A draft without a date lands on today according to the service clock.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Activity` if the draft fails plan
    /// validation, or `TrackerServiceError::Storage` if the snapshot could not
    /// be persisted (the entry is still recorded in memory).
    pub async fn submit(
        &self,
        draft: ActivityDraft,
        plan: &StudyPlan,
    ) -> Result<ActivityLog, TrackerServiceError> {
        let activity = draft.validate(plan, self.clock.today())?;
        self.add_activity(activity).await
    }

    /// Append an already-validated activity to its day and persist.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` if persistence fails; the
    /// in-memory log has already advanced.
    pub async fn add_activity(
        &self,
        activity: Activity,
    ) -> Result<ActivityLog, TrackerServiceError> {
        let updated = {
            let mut guard = self.lock();
            let updated = guard.with_added(activity);
            *guard = updated.clone();
            updated
        };
        self.repo.save_log(&updated).await?;
        Ok(updated)
    }

    /// Remove the entry at `index` within `date` and persist.
    ///
    /// An unknown date or out-of-range index is a no-op that still returns
    /// the (unchanged) log.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` if persistence fails.
    pub async fn remove_activity(
        &self,
        date: StudyDate,
        index: usize,
    ) -> Result<ActivityLog, TrackerServiceError> {
        let updated = {
            let mut guard = self.lock();
            let updated = guard.without(date, index);
            *guard = updated.clone();
            updated
        };
        self.repo.save_log(&updated).await?;
        Ok(updated)
    }

    /// Reset to an empty log and persist the reset.
    ///
    /// # Errors
    ///
    /// Returns `TrackerServiceError::Storage` if persistence fails.
    pub async fn clear_all(&self) -> Result<ActivityLog, TrackerServiceError> {
        let updated = {
            let mut guard = self.lock();
            let updated = guard.cleared();
            *guard = updated.clone();
            updated
        };
        self.repo.save_log(&updated).await?;
        Ok(updated)
    }

    // Aggregation reads over the current snapshot. The math itself lives in
    // `prep_core::progress`; these exist so UI code needs no direct log access.

    #[must_use]
    pub fn topic_progress(&self, plan: &StudyPlan, subject: Subject, topic: &str) -> f64 {
        progress::topic_progress(&self.lock(), plan, subject, topic)
    }

    #[must_use]
    pub fn subject_progress(&self, plan: &StudyPlan, subject: Subject) -> f64 {
        progress::subject_progress(&self.lock(), plan, subject)
    }

    #[must_use]
    pub fn overview(&self, plan: &StudyPlan) -> Vec<SubjectProgress> {
        progress::plan_overview(&self.lock(), plan)
    }
}
