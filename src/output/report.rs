//! Session and batch reports
//!
//! Every page session produces a `SessionReport`; a batch collects them
//! together with any targets that failed under the `continue` policy.

use crate::scrape::ScrapeKind;
use chrono::{DateTime, Utc};

/// What one target's crawl produced
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// The crawled target
    pub target_id: String,

    /// Crawl kind
    pub kind: ScrapeKind,

    /// Artifact key the records were written under
    pub artifact_key: String,

    /// Pages fetched, including the final stop page
    pub pages: u32,

    /// Records accumulated
    pub records: usize,

    /// Artifact writes attempted
    pub writes: usize,

    /// Artifact writes that failed
    pub failed_writes: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionReport {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Returns true if the last write attempt may not hold every record
    pub fn artifact_may_be_stale(&self) -> bool {
        self.failed_writes > 0
    }
}

/// A target whose session ended in an error
#[derive(Debug, Clone)]
pub struct FailedTarget {
    pub target_id: String,
    pub error: String,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Sessions that ran to completion, in run order
    pub completed: Vec<SessionReport>,

    /// Targets that failed and were skipped
    pub failed: Vec<FailedTarget>,
}

impl BatchReport {
    pub fn total_records(&self) -> usize {
        self.completed.iter().map(|r| r.records).sum()
    }

    pub fn total_pages(&self) -> u32 {
        self.completed.iter().map(|r| r.pages).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.completed.iter().all(|r| !r.artifact_may_be_stale())
    }
}

/// Formats a session report as a few human-readable lines
pub fn format_session_report(report: &SessionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} {}\n", report.kind, report.target_id));
    out.push_str(&format!("  Pages: {}\n", report.pages));
    out.push_str(&format!("  Records: {}\n", report.records));
    out.push_str(&format!("  Artifact: {}\n", report.artifact_key));
    if report.failed_writes > 0 {
        out.push_str(&format!(
            "  Failed writes: {} of {}\n",
            report.failed_writes, report.writes
        ));
    }
    out.push_str(&format!("  Duration: {}s\n", report.duration_seconds()));

    out
}

/// Formats a batch report, one section per target
pub fn format_batch_report(report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str("=== Batch Summary ===\n\n");
    out.push_str(&format!(
        "Targets: {} completed, {} failed\n",
        report.completed.len(),
        report.failed.len()
    ));
    out.push_str(&format!(
        "Totals: {} records over {} pages\n\n",
        report.total_records(),
        report.total_pages()
    ));

    for session in &report.completed {
        out.push_str(&format_session_report(session));
    }

    if !report.failed.is_empty() {
        out.push_str("\nFailed Targets:\n");
        for failed in &report.failed {
            out.push_str(&format!("  - {}: {}\n", failed.target_id, failed.error));
        }
    }

    out
}
