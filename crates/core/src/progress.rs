//! Progress aggregation over the activity log.
//!
//! Pure functions: the same log and plan always produce the same percentages,
//! and nothing here touches storage. Percentages are clamped to `[0, 100]`;
//! a zero denominator (misconfigured target, subject with no topics) yields 0
//! rather than dividing by zero.

use crate::model::{ActivityKind, ActivityLog, StudyPlan, Subject};

/// Per-topic completion for rendering progress indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicProgress {
    pub topic: String,
    pub percent: f64,
}

/// Per-subject rollup with nested topic percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectProgress {
    pub subject: Subject,
    pub percent: f64,
    pub topics: Vec<TopicProgress>,
}

/// Completion percentage for one subject-topic pair.
///
/// Sums `questions_done` over matching question entries and divides by the
/// plan's target for the pair. Coverage entries contribute nothing.
#[must_use]
pub fn topic_progress(
    log: &ActivityLog,
    plan: &StudyPlan,
    subject: Subject,
    topic: &str,
) -> f64 {
    let completed: u64 = log
        .entries()
        .filter(|a| {
            a.kind() == ActivityKind::Questions && a.subject() == subject && a.topic() == topic
        })
        .map(|a| u64::from(a.questions_done()))
        .sum();
    percent(completed, u64::from(plan.topic_target(subject, topic)))
}

/// Completion percentage for a whole subject.
///
/// The denominator is the per-topic target times the subject's topic count.
#[must_use]
pub fn subject_progress(log: &ActivityLog, plan: &StudyPlan, subject: Subject) -> f64 {
    let completed: u64 = log
        .entries()
        .filter(|a| a.kind() == ActivityKind::Questions && a.subject() == subject)
        .map(|a| u64::from(a.questions_done()))
        .sum();
    percent(completed, u64::from(plan.subject_denominator(subject)))
}

/// Rollup of every subject and topic in the plan, in catalog order.
#[must_use]
pub fn plan_overview(log: &ActivityLog, plan: &StudyPlan) -> Vec<SubjectProgress> {
    plan.subjects()
        .map(|subject| SubjectProgress {
            subject,
            percent: subject_progress(log, plan, subject),
            topics: plan
                .topics(subject)
                .iter()
                .map(|topic| TopicProgress {
                    topic: topic.clone(),
                    percent: topic_progress(log, plan, subject, topic),
                })
                .collect(),
        })
        .collect()
}

fn percent(completed: u64, target: u64) -> f64 {
    if target == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = completed as f64 / target as f64;
    (ratio * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Activity, PlanOverrides, StudyDate};

    fn day() -> StudyDate {
        StudyDate::from_ymd(2024, 1, 1).unwrap()
    }

    fn questions(subject: Subject, topic: &str, done: u32) -> Activity {
        Activity::new(day(), subject, topic, ActivityKind::Questions, done)
    }

    fn coverage(subject: Subject, topic: &str) -> Activity {
        Activity::new(day(), subject, topic, ActivityKind::Coverage, 0)
    }

    #[test]
    fn two_half_batches_complete_a_topic() {
        let plan = StudyPlan::default();
        let log = ActivityLog::new()
            .with_added(questions(Subject::Math, "Algebra", 35))
            .with_added(questions(Subject::Math, "Algebra", 35));

        let percent = topic_progress(&log, &plan, Subject::Math, "Algebra");
        assert!((percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn topic_progress_clamps_at_one_hundred() {
        let plan = StudyPlan::default();
        let log = ActivityLog::new().with_added(questions(Subject::Math, "Algebra", 10_000));

        let percent = topic_progress(&log, &plan, Subject::Math, "Algebra");
        assert!((percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn subject_progress_spans_all_topics() {
        // Math has 3 topics at a 70-question target each: denominator 210.
        let plan = StudyPlan::default();
        let log = ActivityLog::new()
            .with_added(questions(Subject::Math, "Algebra", 70))
            .with_added(questions(Subject::Math, "Geometry", 35));

        let percent = subject_progress(&log, &plan, Subject::Math);
        assert!((percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coverage_entries_never_move_percentages() {
        let plan = StudyPlan::default();
        let log = ActivityLog::new().with_added(questions(Subject::Math, "Algebra", 35));
        let with_coverage = log
            .with_added(coverage(Subject::Math, "Algebra"))
            .with_added(coverage(Subject::Math, "Geometry"));

        assert!(
            (topic_progress(&log, &plan, Subject::Math, "Algebra")
                - topic_progress(&with_coverage, &plan, Subject::Math, "Algebra"))
            .abs()
                < f64::EPSILON
        );
        assert!(
            (subject_progress(&log, &plan, Subject::Math)
                - subject_progress(&with_coverage, &plan, Subject::Math))
            .abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn other_subjects_do_not_bleed_in() {
        let plan = StudyPlan::default();
        // "Grammar" exists under both English and Writing.
        let log = ActivityLog::new()
            .with_added(questions(Subject::English, "Grammar", 70))
            .with_added(questions(Subject::Writing, "Grammar", 7));

        let english = topic_progress(&log, &plan, Subject::English, "Grammar");
        let writing = topic_progress(&log, &plan, Subject::Writing, "Grammar");
        assert!((english - 100.0).abs() < f64::EPSILON);
        assert!((writing - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_denominator_yields_zero_not_infinity() {
        let mut overrides = PlanOverrides::default();
        overrides.topics.insert(Subject::Math, Vec::new());
        let plan = StudyPlan::default().with_overrides(&overrides);
        let log = ActivityLog::new().with_added(questions(Subject::Math, "Algebra", 50));

        let percent = subject_progress(&log, &plan, Subject::Math);
        assert!(percent.abs() < f64::EPSILON);
    }

    #[test]
    fn unplanned_topic_measures_against_mastery_fallback() {
        let plan = StudyPlan::default();
        let log = ActivityLog::new().with_added(questions(Subject::Math, "Trigonometry", 73));

        let percent = topic_progress(&log, &plan, Subject::Math, "Trigonometry");
        assert!((percent - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_log_is_zero_everywhere() {
        let plan = StudyPlan::default();
        let log = ActivityLog::new();
        for subject in plan.subjects() {
            assert!(subject_progress(&log, &plan, subject).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn overview_walks_the_whole_plan() {
        let plan = StudyPlan::default();
        let log = ActivityLog::new().with_added(questions(Subject::Reading, "Literary Devices", 35));

        let overview = plan_overview(&log, &plan);
        assert_eq!(overview.len(), 4);

        let reading = overview
            .iter()
            .find(|s| s.subject == Subject::Reading)
            .unwrap();
        assert_eq!(reading.topics.len(), 2);
        let devices = reading
            .topics
            .iter()
            .find(|t| t.topic == "Literary Devices")
            .unwrap();
        assert!((devices.percent - 50.0).abs() < f64::EPSILON);
        // 35 of the 140-question subject denominator.
        assert!((reading.percent - 25.0).abs() < f64::EPSILON);
    }
}
