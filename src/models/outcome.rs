//! Download Outcome Models
//!
//! Per-document results and the aggregated run summary.

use std::fmt;
use std::path::PathBuf;

use payslip_core::DocumentRecord;
use serde::{Deserialize, Serialize};

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// Written to disk
    Saved { path: PathBuf, bytes: usize },
    /// Fetch, decode or write failed
    Failed { reason: String },
    /// Not actionable; no request was made
    Skipped { reason: String },
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { path, bytes } => write!(f, "saved {} ({} bytes)", path.display(), bytes),
            Self::Failed { reason } => write!(f, "failed: {}", reason),
            Self::Skipped { reason } => write!(f, "skipped: {}", reason),
        }
    }
}

/// A record together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub record: DocumentRecord,
    pub outcome: DownloadOutcome,
}

/// Aggregated result of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reports: Vec<DocumentReport>,
}

impl RunSummary {
    pub fn push(&mut self, record: DocumentRecord, outcome: DownloadOutcome) {
        self.reports.push(DocumentReport { record, outcome });
    }

    pub fn saved(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Saved { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Skipped { .. }))
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// True when every actionable document was saved.
    pub fn is_complete(&self) -> bool {
        self.failed() == 0
    }

    /// Paths written during the run, in record order.
    pub fn saved_paths(&self) -> Vec<&PathBuf> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                DownloadOutcome::Saved { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&DownloadOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents: {} saved, {} failed, {} skipped",
            self.total(),
            self.saved(),
            self.failed(),
            self.skipped()
        )
    }
}
