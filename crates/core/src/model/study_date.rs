use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Calendar date used as the grouping key for logged activities.
///
/// Locale-independent year/month/day. Renders as ISO `YYYY-MM-DD`, which keeps
/// date keys sortable and uniquely invertible; formatting for display is a UI
/// concern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudyDate(NaiveDate);

impl StudyDate {
    /// Creates a date from calendar components.
    ///
    /// Returns `None` for out-of-range components (e.g. February 30th).
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Debug for StudyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudyDate({})", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Display for StudyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Error type for parsing a date key from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateError {
    raw: String,
}

impl fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized date: {}", self.raw)
    }
}

impl std::error::Error for ParseDateError {}

impl FromStr for StudyDate {
    type Err = ParseDateError;

    /// Parses an ISO `YYYY-MM-DD` date key.
    ///
    /// Also accepts the legacy `M/D/YYYY` form found in snapshots written by
    /// earlier versions, which keyed the log on locale-formatted strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
            .map(Self)
            .map_err(|_| ParseDateError {
                raw: trimmed.to_string(),
            })
    }
}
