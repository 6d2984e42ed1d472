//! Services
//!
//! The extraction-and-transfer pipeline and its collaborators.

pub mod bridge;
pub mod browser;
pub mod lister;
pub mod orchestrator;
pub mod pipeline;
pub mod session;

pub use bridge::{HostSink, TransferBridge};
pub use browser::{BrowserDriver, RemoteExecutor};
pub use lister::DocumentLister;
pub use orchestrator::DownloadOrchestrator;
pub use pipeline::{run, run_with};
pub use session::SessionController;
