//! Output module for run summaries
//!
//! This module builds the reports returned by page sessions and batches and
//! renders them for the terminal.

mod report;

pub use report::{
    format_batch_report, format_session_report, BatchReport, FailedTarget, SessionReport,
};

/// Prints a batch report to stdout
pub fn print_batch_report(report: &BatchReport) {
    print!("{}", format_batch_report(report));
}

/// Prints a session report to stdout
pub fn print_session_report(report: &SessionReport) {
    print!("{}", format_session_report(report));
}
