#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod plan_service;
pub mod tracker_service;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, PlanServiceError, TrackerServiceError};
pub use plan_service::StudyPlanService;
pub use tracker_service::TrackerService;
