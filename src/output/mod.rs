//! Output module for user-facing run summaries

mod report;

pub use report::{print_report, RunMode, RunReport};
