//! Watermark-bounded merge of freshly walked records into a stored dataset
//!
//! With watermark `W` (latest stored issue date):
//! 1. fetched records dated before `W` are dropped as already known
//! 2. the remaining fetched records are merged with the stored records
//!    dated exactly `W`, de-duplicated by title with the fetched record
//!    winning, and ordered newest first
//! 3. stored records dated before `W` follow unchanged
//! 4. fully identical records are collapsed (last occurrence kept)
//! 5. the stored column order is kept
//!
//! A dataset without any dated record has no watermark: every fetched
//! record qualifies in fetch order and every stored record is kept after
//! them.

use crate::catalog::{CatalogRecord, Dataset};
use crate::reconcile::dedup;
use crate::reconcile::watermark::Watermark;
use std::collections::HashSet;

/// Result of reconciling fetched records with a stored dataset
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub dataset: Dataset,

    /// Watermark used for the merge
    pub watermark: Option<Watermark>,

    /// Fetched records at or after the watermark
    pub qualified: usize,

    /// Stored boundary records replaced by a same-titled fetched record
    pub superseded: usize,

    /// `len(result) - len(existing)`
    pub added: i64,
}

/// Merges freshly walked records into an existing dataset
pub fn reconcile_update(existing: &Dataset, fetched: &[CatalogRecord]) -> Reconciliation {
    let watermark = Watermark::of(existing);

    let (qualified, boundary, remainder): (Vec<_>, Vec<_>, Vec<_>) = match &watermark {
        Some(w) => (
            fetched.iter().filter(|r| w.admits(r)).cloned().collect(),
            existing
                .records
                .iter()
                .filter(|r| r.issue_date == *w.date())
                .cloned()
                .collect(),
            existing
                .records
                .iter()
                .filter(|r| r.issue_date < *w.date())
                .cloned()
                .collect(),
        ),
        None => (fetched.to_vec(), Vec::new(), existing.records.clone()),
    };

    let qualified_count = qualified.len();
    let boundary_count = boundary.len();

    let fresh = dedup::keep_first_by(qualified, |r| r.title.clone());
    let fresh_titles: HashSet<&str> = fresh.iter().map(|r| r.title.as_str()).collect();
    let (replaced, kept): (Vec<_>, Vec<_>) = boundary
        .into_iter()
        .partition(|r| fresh_titles.contains(r.title.as_str()));
    let superseded = replaced.len();

    let mut merged: Vec<CatalogRecord> = fresh
        .iter()
        .cloned()
        .chain(dedup::keep_first_by(kept, |r| r.title.clone()))
        .collect();
    if watermark.is_some() {
        merged.sort_by(|a, b| b.issue_date.cmp(&a.issue_date));
    }

    let records = dedup::keep_last(merged.into_iter().chain(remainder).collect());
    let dataset = Dataset::with_columns(existing.columns.clone(), records);
    let added = dataset.len() as i64 - existing.len() as i64;

    tracing::debug!(
        "Reconciled {} fetched records: {} qualified, {} boundary, {} superseded",
        fetched.len(),
        qualified_count,
        boundary_count,
        superseded
    );

    Reconciliation {
        dataset,
        watermark,
        qualified: qualified_count,
        superseded,
        added,
    }
}
