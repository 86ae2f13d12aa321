use std::collections::BTreeMap;

use crate::model::activity::Activity;
use crate::model::study_date::StudyDate;

/// The canonical log of recorded study events, grouped by calendar day.
///
/// Within a day, entries keep insertion order (the order they were submitted).
/// Invariant: a date key is present only while it has at least one entry;
/// removing the last entry for a day drops the key.
///
/// Updates return a new log rather than mutating in place, so callers can hold
/// on to a previous snapshot for change detection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityLog {
    days: BTreeMap<StudyDate, Vec<Activity>>,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from per-day sequences, dropping empty days.
    #[must_use]
    pub fn from_days(days: BTreeMap<StudyDate, Vec<Activity>>) -> Self {
        let days = days
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .collect();
        Self { days }
    }

    /// Returns a new log with `activity` appended to its day.
    #[must_use]
    pub fn with_added(&self, activity: Activity) -> Self {
        let mut next = self.clone();
        next.days.entry(activity.date()).or_default().push(activity);
        next
    }

    /// Returns a new log with the entry at `index` within `date` removed.
    ///
    /// An unknown date or out-of-range index is a no-op; the returned log
    /// equals `self`. If the day's last entry is removed, the date key is
    /// dropped.
    #[must_use]
    pub fn without(&self, date: StudyDate, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(entries) = next.days.get_mut(&date) {
            if index < entries.len() {
                entries.remove(index);
                if entries.is_empty() {
                    next.days.remove(&date);
                }
            }
        }
        next
    }

    /// Returns an empty log.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    /// Entries recorded on `date`, in submission order.
    #[must_use]
    pub fn for_date(&self, date: StudyDate) -> &[Activity] {
        self.days.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Iterates days in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (StudyDate, &[Activity])> {
        self.days
            .iter()
            .map(|(date, entries)| (*date, entries.as_slice()))
    }

    /// Iterates every entry, chronologically by day.
    pub fn entries(&self) -> impl Iterator<Item = &Activity> {
        self.days.values().flatten()
    }

    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
