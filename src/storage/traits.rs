//! Storage traits and error types
//!
//! This module defines the trait interface for dataset backends and the
//! errors they report.

use crate::catalog::{Column, Dataset};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read workbook {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Workbook {0} has no worksheets")]
    NoSheet(String),

    #[error("Worksheet '{0}' has no header row")]
    MissingHeader(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(Column),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(Column),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence of catalog datasets
pub trait DatasetStore {
    /// Reads a dataset, keeping the stored column order
    fn load(&self, path: &Path) -> StorageResult<Dataset>;

    /// Writes a dataset in its own column order, replacing any existing file
    ///
    /// Every stored title carries a reference to the row's link.
    fn save(&self, dataset: Dataset, path: &Path) -> StorageResult<()>;
}
