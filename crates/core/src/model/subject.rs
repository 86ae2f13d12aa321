use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tracked study subject.
///
/// The subject set is closed; topics within a subject are configured via
/// [`crate::model::StudyPlan`] and may be edited at runtime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Math,
    English,
    Reading,
    Writing,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Math,
        Subject::English,
        Subject::Reading,
        Subject::Writing,
    ];

    /// Returns the display name of the subject.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::English => "English",
            Subject::Reading => "Reading",
            Subject::Writing => "Writing",
        }
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject({})", self.name())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for parsing a subject from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSubjectError {
    raw: String,
}

impl fmt::Display for ParseSubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized subject: {}", self.raw)
    }
}

impl std::error::Error for ParseSubjectError {}

impl FromStr for Subject {
    type Err = ParseSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Math" => Ok(Subject::Math),
            "English" => Ok(Subject::English),
            "Reading" => Ok(Subject::Reading),
            "Writing" => Ok(Subject::Writing),
            other => Err(ParseSubjectError {
                raw: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_display_matches_catalog_name() {
        assert_eq!(Subject::Math.to_string(), "Math");
        assert_eq!(Subject::Reading.to_string(), "Reading");
    }

    #[test]
    fn subject_from_str_trims_whitespace() {
        let subject: Subject = " English ".parse().unwrap();
        assert_eq!(subject, Subject::English);
    }

    #[test]
    fn subject_from_str_rejects_unknown() {
        let result = "Science".parse::<Subject>();
        assert!(result.is_err());
    }

    #[test]
    fn subject_roundtrip() {
        for subject in Subject::ALL {
            let parsed: Subject = subject.to_string().parse().unwrap();
            assert_eq!(parsed, subject);
        }
    }
}
