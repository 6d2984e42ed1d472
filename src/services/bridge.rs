//! Transfer Bridge
//!
//! Host side of the byte channel: takes a `TransportString` produced inside
//! the page, decodes it and writes the bytes to disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use payslip_core::{decode, TransportString};
use tracing::debug;

use crate::utils::error::AppResult;

/// Receives encoded payloads and persists them.
#[async_trait]
pub trait HostSink: Send + Sync {
    /// Decode `encoded` and write it to `target`, returning the path written.
    async fn write_transport_string(
        &self,
        encoded: &TransportString,
        target: &Path,
    ) -> AppResult<PathBuf>;
}

/// Writes decoded payloads to the local filesystem.
///
/// Each call creates or truncates `target` and writes the whole body in one
/// go. Two payloads for the same path are not coordinated: last write wins.
/// The parent directory must already exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransferBridge;

impl TransferBridge {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostSink for TransferBridge {
    async fn write_transport_string(
        &self,
        encoded: &TransportString,
        target: &Path,
    ) -> AppResult<PathBuf> {
        let bytes = decode(encoded)?;
        tokio::fs::write(target, &bytes).await?;
        debug!("[Bridge] wrote {} bytes to {}", bytes.len(), target.display());
        Ok(target.to_path_buf())
    }
}
