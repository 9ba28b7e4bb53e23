//! Run summaries
//!
//! Every crawl or update ends with a [`RunReport`] that the binary prints
//! for the user.

use crate::crawler::StopReason;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which operation produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    FullCrawl,
    Update,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::FullCrawl => f.write_str("full crawl"),
            RunMode::Update => f.write_str("update"),
        }
    }
}

/// Outcome of one crawl or update run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: RunMode,

    /// Listing pages fetched
    pub pages_visited: usize,

    pub stop_reason: StopReason,

    /// Records extracted across all pages, before de-duplication
    pub records_fetched: usize,

    /// Records in the written dataset
    pub records_written: usize,

    /// Dataset growth; equals `records_written` for a full crawl
    pub records_added: i64,

    /// Watermark date the update merged against
    pub watermark: Option<String>,

    pub destination: PathBuf,

    pub elapsed: Duration,
}

/// Prints a run report to stdout
pub fn print_report(report: &RunReport) {
    println!("=== Regcat {} ===\n", report.mode);

    println!(
        "Pages visited: {} ({})",
        report.pages_visited, report.stop_reason
    );
    println!("Records fetched: {}", report.records_fetched);

    if report.mode == RunMode::Update {
        match &report.watermark {
            Some(date) => println!("Watermark: {}", date),
            None => println!("Watermark: none (dataset had no dated records)"),
        }
        println!("Records added: {}", report.records_added);
    }

    println!("Records written: {}", report.records_written);
    println!("Saved to: {}", report.destination.display());
    println!("Elapsed: {:.1} minutes", report.elapsed.as_secs_f64() / 60.0);
}
