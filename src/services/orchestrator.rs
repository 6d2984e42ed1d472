//! Download Orchestrator
//!
//! Starts one download per actionable record, all at once, and waits for
//! every one of them before returning. The returned `RunSummary` is the
//! completion barrier: the session may only be torn down after it exists.
//!
//! Each download runs the whole channel for one document:
//! in-page fetch -> `TransportString` -> `HostSink` -> file.

use std::path::Path;

use futures::future::join_all;
use payslip_core::DocumentRecord;
use tracing::{debug, info, warn};

use crate::models::outcome::{DownloadOutcome, RunSummary};
use crate::services::bridge::HostSink;
use crate::services::browser::RemoteExecutor;

pub struct DownloadOrchestrator<'a> {
    executor: &'a dyn RemoteExecutor,
    sink: &'a dyn HostSink,
}

impl<'a> DownloadOrchestrator<'a> {
    pub fn new(executor: &'a dyn RemoteExecutor, sink: &'a dyn HostSink) -> Self {
        Self { executor, sink }
    }

    /// Download every actionable record into `save_dir`.
    ///
    /// Downloads are driven concurrently on the current task; completion
    /// order is arbitrary but the summary lists records in input order.
    /// Individual failures never abort the others.
    pub async fn download_all(&self, records: Vec<DocumentRecord>, save_dir: &Path) -> RunSummary {
        let outcomes = join_all(records.iter().map(|record| self.download_one(record, save_dir))).await;

        let mut summary = RunSummary::default();
        for (record, outcome) in records.into_iter().zip(outcomes) {
            summary.push(record, outcome);
        }
        debug!("[Orchestrator] {}", summary);
        summary
    }

    async fn download_one(&self, record: &DocumentRecord, save_dir: &Path) -> DownloadOutcome {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            return DownloadOutcome::Skipped {
                reason: format!("missing {}", missing.join(", ")),
            };
        }
        let (Some(source_url), Some(target)) =
            (record.source_url.as_deref(), record.target_path(save_dir))
        else {
            return DownloadOutcome::Skipped {
                reason: "incomplete record".to_string(),
            };
        };

        let encoded = match self.executor.fetch_encoded(source_url).await {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("[Orchestrator] {}: {}", record, e);
                return DownloadOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self.sink.write_transport_string(&encoded, &target).await {
            Ok(path) => {
                info!("[Orchestrator] saved {}", path.display());
                DownloadOutcome::Saved {
                    path,
                    bytes: encoded.len(),
                }
            }
            Err(e) => {
                warn!("[Orchestrator] {}: could not write {}: {}", record, target.display(), e);
                DownloadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
