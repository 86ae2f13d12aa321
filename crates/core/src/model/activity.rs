use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::study_date::StudyDate;
use crate::model::study_plan::StudyPlan;
use crate::model::subject::Subject;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActivityError {
    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error("topic {topic:?} is not part of the {subject} plan")]
    UnknownTopic { subject: Subject, topic: String },

    #[error("a question entry needs a question count")]
    MissingQuestionCount,
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// What a logged entry records: a batch of practice questions, or a binary
/// "topic covered" event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Questions,
    Coverage,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Questions => f.write_str("questions"),
            ActivityKind::Coverage => f.write_str("coverage"),
        }
    }
}

//
// ─── ACTIVITY ──────────────────────────────────────────────────────────────────
//

/// One recorded study event.
///
/// Coverage entries carry no question count; their `questions_done` is always
/// zero so the progress aggregator only ever sums one numeric field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Activity {
    date: StudyDate,
    subject: Subject,
    topic: String,
    kind: ActivityKind,
    questions_done: u32,
}

impl Activity {
    /// Creates an activity without plan validation.
    ///
    /// The log stays permissive about subjects and topics; submission paths
    /// should go through [`ActivityDraft::validate`] instead.
    #[must_use]
    pub fn new(
        date: StudyDate,
        subject: Subject,
        topic: impl Into<String>,
        kind: ActivityKind,
        questions_done: u32,
    ) -> Self {
        let questions_done = match kind {
            ActivityKind::Questions => questions_done,
            ActivityKind::Coverage => 0,
        };
        Self {
            date,
            subject,
            topic: topic.into(),
            kind,
            questions_done,
        }
    }

    // Accessors
    #[must_use]
    pub fn date(&self) -> StudyDate {
        self.date
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        self.kind
    }

    #[must_use]
    pub fn questions_done(&self) -> u32 {
        self.questions_done
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated form submission for a study event.
#[derive(Clone, Debug)]
pub struct ActivityDraft {
    /// Target day; `None` means "today" as supplied by the caller.
    pub date: Option<StudyDate>,
    pub subject: Subject,
    pub topic: String,
    pub kind: ActivityKind,
    pub questions_done: Option<u32>,
}

impl ActivityDraft {
    /// Validate the draft against the study plan.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError` if the topic is empty or not part of the
    /// subject's topic list, or if a question entry has no count. Coverage
    /// entries ignore any provided count.
    pub fn validate(self, plan: &StudyPlan, today: StudyDate) -> Result<Activity, ActivityError> {
        let topic = self.topic.trim().to_owned();
        if topic.is_empty() {
            return Err(ActivityError::EmptyTopic);
        }
        if !plan.contains_topic(self.subject, &topic) {
            return Err(ActivityError::UnknownTopic {
                subject: self.subject,
                topic,
            });
        }

        let questions_done = match self.kind {
            ActivityKind::Questions => self
                .questions_done
                .ok_or(ActivityError::MissingQuestionCount)?,
            ActivityKind::Coverage => 0,
        };

        Ok(Activity {
            date: self.date.unwrap_or(today),
            subject: self.subject,
            topic,
            kind: self.kind,
            questions_done,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
