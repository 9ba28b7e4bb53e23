//! Crawler module for listing traversal and run coordination
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching with bounded retry
//! - Record extraction from listing pages
//! - Category/region lookup for the search filter
//! - Paced, sequential page walking
//! - Full-crawl and update coordination

mod coordinator;
mod extractor;
mod fetcher;
mod filter;
mod pacing;
mod walker;

pub use coordinator::{Coordinator, UpdateRequest};
pub use extractor::{ExtractedPage, Extractor};
pub use fetcher::{build_http_client, HttpSource, PageSource};
pub use filter::{parse_filter_directory, FilterDirectory, SearchFilter};
pub use pacing::{NoDelay, Pacer, RandomPacer};
pub use walker::{PageWalker, StopReason, WalkOutcome};
