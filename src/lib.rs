//! Payslip Downloader - Library
//!
//! Logs in to the payslip portal with headless Chrome, reads the document
//! list, and saves every document as `{saveDir}/{date}-{type}.pdf`.
//! It includes:
//! - Configuration loading and validation
//! - The browser seam (`BrowserDriver`, `RemoteExecutor`) and its Chrome backend
//! - Session control, list extraction, the transfer bridge and the download orchestrator
//! - Data models and utilities

pub mod cli;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::config::{BrowserOptions, PortalConfig, PortalSelectors, TimingConfig};
pub use models::outcome::{DocumentReport, DownloadOutcome, RunSummary};
pub use services::{
    run, run_with, BrowserDriver, DocumentLister, DownloadOrchestrator, HostSink, RemoteExecutor,
    SessionController, TransferBridge,
};
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
