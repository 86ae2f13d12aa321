//! Wire shapes for the persisted JSON documents.
//!
//! These mirror the domain types so backends can serialize/deserialize without
//! leaking storage concerns into the domain layer. The activity document is a
//! map keyed by date string, each value an ordered array of entry records:
//!
//! ```json
//! { "2024-01-15": [ { "subject": "Math", "topic": "Algebra",
//!                     "kind": "questions", "questionsDone": 35 } ] }
//! ```
//!
//! Decoding is lenient: rows with unknown subjects and keys that do not parse
//! as dates are skipped instead of poisoning the whole snapshot. Legacy
//! snapshots used `selectedOption` for the kind field and `M/D/YYYY` date
//! keys; both still decode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use prep_core::model::{Activity, ActivityKind, ActivityLog, PlanOverrides, StudyDate, Subject};

/// Persisted shape for one activity row. The date lives on the enclosing map
/// key, not the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub subject: String,
    pub topic: String,
    #[serde(alias = "selectedOption")]
    pub kind: ActivityKind,
    #[serde(default)]
    pub questions_done: u32,
}

impl ActivityRecord {
    #[must_use]
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            subject: activity.subject().to_string(),
            topic: activity.topic().to_owned(),
            kind: activity.kind(),
            questions_done: activity.questions_done(),
        }
    }

    /// Convert the record back into a domain `Activity`.
    ///
    /// Returns `None` when the stored subject is not part of the catalog.
    #[must_use]
    pub fn into_activity(self, date: StudyDate) -> Option<Activity> {
        let subject: Subject = self.subject.parse().ok()?;
        Some(Activity::new(
            date,
            subject,
            self.topic,
            self.kind,
            self.questions_done,
        ))
    }
}

/// The activity document: date key to ordered entry rows.
pub type LogDocument = BTreeMap<String, Vec<ActivityRecord>>;

#[must_use]
pub fn document_from_log(log: &ActivityLog) -> LogDocument {
    log.days()
        .map(|(date, entries)| {
            (
                date.to_string(),
                entries.iter().map(ActivityRecord::from_activity).collect(),
            )
        })
        .collect()
}

/// Rebuild a log from a decoded document, skipping rows that no longer parse.
#[must_use]
pub fn log_from_document(document: LogDocument) -> ActivityLog {
    let days = document
        .into_iter()
        .filter_map(|(key, records)| {
            let date: StudyDate = key.parse().ok()?;
            let entries: Vec<Activity> = records
                .into_iter()
                .filter_map(|record| record.into_activity(date))
                .collect();
            Some((date, entries))
        })
        .collect();
    ActivityLog::from_days(days)
}

/// Persisted shape for the plan-overrides document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverridesRecord {
    pub questions_per_subject: BTreeMap<Subject, u32>,
    pub topics: BTreeMap<Subject, Vec<String>>,
    pub questions_per_topic: BTreeMap<Subject, BTreeMap<String, u32>>,
}

impl OverridesRecord {
    #[must_use]
    pub fn from_overrides(overrides: &PlanOverrides) -> Self {
        Self {
            questions_per_subject: overrides.questions_per_subject.clone(),
            topics: overrides.topics.clone(),
            questions_per_topic: overrides.questions_per_topic.clone(),
        }
    }

    #[must_use]
    pub fn into_overrides(self) -> PlanOverrides {
        PlanOverrides {
            questions_per_subject: self.questions_per_subject,
            topics: self.topics,
            questions_per_topic: self.questions_per_topic,
        }
    }
}
