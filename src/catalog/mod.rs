//! Catalog data model
//!
//! Records, their columns, and the ordered dataset that ties them to a
//! stored column order.

mod dataset;
mod date;
mod record;

pub use dataset::{Column, Dataset};
pub use date::IssueDate;
pub use record::CatalogRecord;
