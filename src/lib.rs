//! Regcat: a regulatory catalog harvester
//!
//! This crate walks a paginated regulation search listing, extracts one
//! catalog record per listed document and keeps a spreadsheet-backed dataset
//! of those records, either built from scratch or reconciled incrementally
//! against a date watermark.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod reconcile;
pub mod storage;

use thiserror::Error;

/// Main error type for Regcat operations
#[derive(Debug, Error)]
pub enum RegcatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Giving up on {url} after {attempts} attempts")]
    FetchExhausted { url: String, attempts: u32 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Category '{0}' is not listed by the site")]
    UnknownCategory(String),

    #[error("Region '{0}' is not listed by the site")]
    UnknownRegion(String),

    #[error("Category '{category}' does not match dataset '{dataset}'")]
    IdentityMismatch { category: String, dataset: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Regcat operations
pub type Result<T> = std::result::Result<T, RegcatError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{CatalogRecord, Column, Dataset, IssueDate};
pub use config::Config;
pub use crawler::{Coordinator, SearchFilter, UpdateRequest};
pub use reconcile::{Reconciliation, Watermark};
pub use storage::{DatasetStore, XlsxStore};
