//! Storage module for persisting catalog datasets
//!
//! This module handles:
//! - The `DatasetStore` interface the run coordinator writes through
//! - Spreadsheet (xlsx) reading and writing with hyperlinked titles
//! - Dataset file naming conventions

mod paths;
mod traits;
mod xlsx;

pub use paths::{update_source_path, with_xlsx_extension};
pub use traits::{DatasetStore, StorageError, StorageResult};
pub use xlsx::XlsxStore;
