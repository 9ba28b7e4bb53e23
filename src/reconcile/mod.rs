//! Reconciliation of walked records into datasets
//!
//! Two policies, kept deliberately different:
//! - a full crawl only collapses fully identical records
//! - an update merges against the stored watermark and de-duplicates the
//!   boundary date by title, preferring freshly fetched records

mod dedup;
mod full;
mod identity;
mod merge;
mod watermark;

pub use full::merge_full_crawl;
pub use identity::ensure_same_category;
pub use merge::{reconcile_update, Reconciliation};
pub use watermark::Watermark;
