use thiserror::Error;

use crate::model::ActivityError;
use crate::model::PlanError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Activity(#[from] ActivityError),
    #[error(transparent)]
    Plan(#[from] PlanError),
}
