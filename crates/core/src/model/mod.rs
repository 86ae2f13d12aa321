mod activity;
mod activity_log;
mod study_date;
mod study_plan;
mod subject;

pub use activity::{Activity, ActivityDraft, ActivityError, ActivityKind};
pub use activity_log::ActivityLog;
pub use study_date::{ParseDateError, StudyDate};
pub use study_plan::{
    DEFAULT_QUESTIONS_PER_TOPIC, FULL_MASTERY_QUESTIONS, PlanError, PlanOverrides, StudyPlan,
};
pub use subject::{ParseSubjectError, Subject};
