use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::subject::Subject;

/// Default question target for a single subject-topic pair.
pub const DEFAULT_QUESTIONS_PER_TOPIC: u32 = 70;

/// Denominator applied to topics outside the configured plan: the question
/// count treated as full mastery of an untargeted topic.
pub const FULL_MASTERY_QUESTIONS: u32 = 730;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("question target for {0} must be > 0")]
    ZeroSubjectTarget(Subject),

    #[error("question target for {subject} topic {topic:?} must be > 0")]
    ZeroTopicTarget { subject: Subject, topic: String },

    #[error("topic names for {0} cannot be empty")]
    EmptyTopicName(Subject),

    #[error("duplicate topic {topic:?} for {subject}")]
    DuplicateTopic { subject: Subject, topic: String },
}

//
// ─── OVERRIDES ─────────────────────────────────────────────────────────────────
//

/// User-editable settings layered over the default plan.
///
/// Persisted in a separate namespace from the activity log; absent entries
/// fall back to the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanOverrides {
    pub questions_per_subject: BTreeMap<Subject, u32>,
    pub topics: BTreeMap<Subject, Vec<String>>,
    pub questions_per_topic: BTreeMap<Subject, BTreeMap<String, u32>>,
}

impl PlanOverrides {
    /// Check the overrides for zero targets and malformed topic lists.
    ///
    /// # Errors
    ///
    /// Returns `PlanError` naming the first offending subject or topic.
    pub fn validate(&self) -> Result<(), PlanError> {
        for (subject, target) in &self.questions_per_subject {
            if *target == 0 {
                return Err(PlanError::ZeroSubjectTarget(*subject));
            }
        }
        for (subject, topics) in &self.topics {
            let mut seen: Vec<&str> = Vec::with_capacity(topics.len());
            for topic in topics {
                let trimmed = topic.trim();
                if trimmed.is_empty() {
                    return Err(PlanError::EmptyTopicName(*subject));
                }
                if seen.contains(&trimmed) {
                    return Err(PlanError::DuplicateTopic {
                        subject: *subject,
                        topic: trimmed.to_string(),
                    });
                }
                seen.push(trimmed);
            }
        }
        for (subject, targets) in &self.questions_per_topic {
            for (topic, target) in targets {
                if *target == 0 {
                    return Err(PlanError::ZeroTopicTarget {
                        subject: *subject,
                        topic: topic.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

/// The catalog of subjects, their topic lists, and question targets.
///
/// This is the single owner of the subject/topic tables; every consumer
/// (forms, aggregation, rendering) reads them from here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyPlan {
    topics: BTreeMap<Subject, Vec<String>>,
    questions_per_subject: BTreeMap<Subject, u32>,
    questions_per_topic: BTreeMap<Subject, BTreeMap<String, u32>>,
}

impl Default for StudyPlan {
    fn default() -> Self {
        let catalog: [(Subject, &[&str]); 4] = [
            (Subject::Math, &["Algebra", "Geometry", "Statistics"]),
            (Subject::English, &["Grammar", "Vocabulary", "Comprehension"]),
            (Subject::Reading, &["Passage Analysis", "Literary Devices"]),
            (Subject::Writing, &["Essay Writing", "Grammar", "Punctuation"]),
        ];

        let topics = catalog
            .into_iter()
            .map(|(subject, names)| {
                (subject, names.iter().map(|n| (*n).to_string()).collect())
            })
            .collect();

        Self {
            topics,
            questions_per_subject: BTreeMap::new(),
            questions_per_topic: BTreeMap::new(),
        }
    }
}

impl StudyPlan {
    /// Returns this plan with validated overrides layered on top.
    ///
    /// Topic lists replace the defaults for the subjects they name; targets
    /// merge per subject and per topic.
    #[must_use]
    pub fn with_overrides(&self, overrides: &PlanOverrides) -> Self {
        let mut next = self.clone();
        for (subject, topics) in &overrides.topics {
            let cleaned: Vec<String> = topics
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            next.topics.insert(*subject, cleaned);
        }
        for (subject, target) in &overrides.questions_per_subject {
            next.questions_per_subject.insert(*subject, *target);
        }
        for (subject, targets) in &overrides.questions_per_topic {
            next.questions_per_topic
                .entry(*subject)
                .or_default()
                .extend(targets.iter().map(|(t, n)| (t.clone(), *n)));
        }
        next
    }

    /// Subjects in the plan, in catalog order.
    pub fn subjects(&self) -> impl Iterator<Item = Subject> {
        self.topics.keys().copied()
    }

    /// The topic list for a subject, empty if the subject has none.
    #[must_use]
    pub fn topics(&self, subject: Subject) -> &[String] {
        self.topics.get(&subject).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains_topic(&self, subject: Subject, topic: &str) -> bool {
        self.topics(subject).iter().any(|t| t == topic)
    }

    /// Question target counted per topic of this subject.
    #[must_use]
    pub fn subject_target(&self, subject: Subject) -> u32 {
        self.questions_per_subject
            .get(&subject)
            .copied()
            .unwrap_or(DEFAULT_QUESTIONS_PER_TOPIC)
    }

    /// Question target for a subject-topic pair.
    ///
    /// A topic outside the plan falls back to [`FULL_MASTERY_QUESTIONS`].
    #[must_use]
    pub fn topic_target(&self, subject: Subject, topic: &str) -> u32 {
        if let Some(target) = self
            .questions_per_topic
            .get(&subject)
            .and_then(|targets| targets.get(topic))
        {
            return *target;
        }
        if self.contains_topic(subject, topic) {
            self.subject_target(subject)
        } else {
            FULL_MASTERY_QUESTIONS
        }
    }

    /// Denominator for whole-subject progress: per-topic target times the
    /// number of topics.
    #[must_use]
    pub fn subject_denominator(&self, subject: Subject) -> u32 {
        let topic_count = u32::try_from(self.topics(subject).len()).unwrap_or(u32::MAX);
        self.subject_target(subject).saturating_mul(topic_count)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_carries_the_full_catalog() {
        let plan = StudyPlan::default();
        assert_eq!(plan.subjects().count(), 4);
        assert_eq!(plan.topics(Subject::Math).len(), 3);
        assert_eq!(plan.topics(Subject::Reading).len(), 2);
        assert!(plan.contains_topic(Subject::Writing, "Punctuation"));
        assert!(!plan.contains_topic(Subject::Math, "Punctuation"));
    }

    #[test]
    fn default_targets_use_named_constants() {
        let plan = StudyPlan::default();
        assert_eq!(
            plan.subject_target(Subject::Math),
            DEFAULT_QUESTIONS_PER_TOPIC
        );
        assert_eq!(
            plan.topic_target(Subject::Math, "Algebra"),
            DEFAULT_QUESTIONS_PER_TOPIC
        );
        assert_eq!(plan.subject_denominator(Subject::Math), 210);
        assert_eq!(plan.subject_denominator(Subject::Reading), 140);
    }

    #[test]
    fn unplanned_topic_falls_back_to_mastery_denominator() {
        let plan = StudyPlan::default();
        assert_eq!(
            plan.topic_target(Subject::Math, "Trigonometry"),
            FULL_MASTERY_QUESTIONS
        );
    }

    #[test]
    fn overrides_merge_targets_and_replace_topic_lists() {
        let mut overrides = PlanOverrides::default();
        overrides.questions_per_subject.insert(Subject::Math, 100);
        overrides
            .topics
            .insert(Subject::Reading, vec!["Skimming".into()]);
        overrides
            .questions_per_topic
            .entry(Subject::Math)
            .or_default()
            .insert("Algebra".into(), 50);

        let plan = StudyPlan::default().with_overrides(&overrides);
        assert_eq!(plan.subject_target(Subject::Math), 100);
        assert_eq!(plan.topic_target(Subject::Math, "Algebra"), 50);
        // Non-overridden topics inherit the subject target.
        assert_eq!(plan.topic_target(Subject::Math, "Geometry"), 100);
        assert_eq!(plan.topics(Subject::Reading), ["Skimming".to_string()]);
        // Untouched subjects keep their defaults.
        assert_eq!(plan.topics(Subject::English).len(), 3);
    }

    #[test]
    fn validate_rejects_zero_targets() {
        let mut overrides = PlanOverrides::default();
        overrides.questions_per_subject.insert(Subject::English, 0);
        assert_eq!(
            overrides.validate().unwrap_err(),
            PlanError::ZeroSubjectTarget(Subject::English)
        );
    }

    #[test]
    fn validate_rejects_empty_and_duplicate_topics() {
        let mut overrides = PlanOverrides::default();
        overrides.topics.insert(Subject::Math, vec!["  ".into()]);
        assert_eq!(
            overrides.validate().unwrap_err(),
            PlanError::EmptyTopicName(Subject::Math)
        );

        let mut overrides = PlanOverrides::default();
        overrides
            .topics
            .insert(Subject::Math, vec!["Algebra".into(), "Algebra ".into()]);
        assert_eq!(
            overrides.validate().unwrap_err(),
            PlanError::DuplicateTopic {
                subject: Subject::Math,
                topic: "Algebra".into()
            }
        );
    }

    #[test]
    fn duplicate_topic_names_across_subjects_are_fine() {
        // "Grammar" legitimately appears under both English and Writing.
        let plan = StudyPlan::default();
        assert!(plan.contains_topic(Subject::English, "Grammar"));
        assert!(plan.contains_topic(Subject::Writing, "Grammar"));
    }
}
