//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::{ActivityError, PlanError};
use storage::json::JsonInitError;
use storage::repository::StorageError;

/// Errors emitted by `TrackerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerServiceError {
    #[error(transparent)]
    Activity(#[from] ActivityError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudyPlanService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanServiceError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Json(#[from] JsonInitError),
}
