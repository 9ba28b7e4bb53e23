//! Configuration module for Regcat
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key is optional; missing sections keep built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use regcat::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("regcat.toml")).unwrap();
//! println!("Walking from: {}", config.site.search_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetchConfig, MarkupConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, default_config, load_config, load_config_with_hash};
