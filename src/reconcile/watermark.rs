use crate::catalog::{CatalogRecord, Dataset, IssueDate};
use std::fmt;

/// Latest issue date already present in a dataset
///
/// Fixed for the duration of an update run. Pages whose oldest record is
/// older than the watermark end the walk, and fetched records older than it
/// are treated as already known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark(IssueDate);

impl Watermark {
    /// Maximum non-empty issue date of the dataset, if any
    pub fn of(dataset: &Dataset) -> Option<Self> {
        dataset
            .records
            .iter()
            .map(|r| &r.issue_date)
            .filter(|d| !d.is_empty())
            .max()
            .cloned()
            .map(Self)
    }

    pub fn date(&self) -> &IssueDate {
        &self.0
    }

    /// Whether a record is at or after the watermark
    pub fn admits(&self, record: &CatalogRecord) -> bool {
        record.issue_date >= self.0
    }

    /// Whether the oldest dated record of a page precedes the watermark
    ///
    /// Undated records are ignored, so a single record with a missing date
    /// does not end the walk early. A page without dated records never
    /// counts as stale.
    pub fn page_is_stale(&self, page: &[CatalogRecord]) -> bool {
        page.iter()
            .map(|r| &r.issue_date)
            .filter(|d| !d.is_empty())
            .min()
            .is_some_and(|oldest| *oldest < self.0)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
