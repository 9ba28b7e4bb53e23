//! Issue date normalization
//!
//! Listing pages and older dataset files spell dates in a handful of ways.
//! Dates are normalized to `YYYY-MM-DD` so that ordering is a plain
//! lexical comparison; text that is not a recognizable date is kept as-is.

use chrono::NaiveDate;
use std::fmt;

const ACCEPTED_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];

/// Issue date of a catalog record
///
/// The empty date sorts before every other date.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueDate(String);

impl IssueDate {
    /// Normalizes raw date text
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let normalized = ACCEPTED_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| trimmed.to_string());
        Self(normalized)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IssueDate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for IssueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_known_formats() {
        assert_eq!(IssueDate::parse("2024-01-05").as_str(), "2024-01-05");
        assert_eq!(IssueDate::parse("2024-1-5").as_str(), "2024-01-05");
        assert_eq!(IssueDate::parse("2024/01/05").as_str(), "2024-01-05");
        assert_eq!(IssueDate::parse("2024.1.5").as_str(), "2024-01-05");
        assert_eq!(IssueDate::parse("2024年1月5日").as_str(), "2024-01-05");
        assert_eq!(IssueDate::parse("  2024-01-05 ").as_str(), "2024-01-05");
    }

    #[test]
    fn test_keeps_unrecognized_text() {
        assert_eq!(IssueDate::parse(" sometime ").as_str(), "sometime");
        assert!(IssueDate::parse("   ").is_empty());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let early = IssueDate::parse("2023/12/31");
        let late = IssueDate::parse("2024-1-2");
        assert!(early < late);
        assert!(IssueDate::empty() < early);
    }
}
