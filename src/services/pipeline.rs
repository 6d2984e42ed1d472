//! Download Pipeline
//!
//! One run over one session:
//! authenticate -> reveal list -> extract records -> download all -> teardown.
//!
//! Authentication finishes before extraction starts, extraction finishes
//! before any download starts, and teardown happens exactly once, after
//! every download has finished.

use tracing::warn;

use crate::models::config::PortalConfig;
use crate::models::outcome::RunSummary;
use crate::services::bridge::HostSink;
use crate::services::browser::{BrowserDriver, RemoteExecutor};
use crate::services::lister::DocumentLister;
use crate::services::orchestrator::DownloadOrchestrator;
use crate::services::session::SessionController;
use crate::utils::error::{AppError, AppResult};

/// Run the pipeline against an already launched session.
///
/// The session is always closed before returning. A close failure after a
/// successful run is logged; the summary is still returned.
pub async fn run_with(
    driver: &dyn BrowserDriver,
    executor: &dyn RemoteExecutor,
    sink: &dyn HostSink,
    config: &PortalConfig,
) -> AppResult<RunSummary> {
    let result = run_session(driver, executor, sink, config).await;

    match (result, driver.close().await) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(summary), Err(e)) => {
            warn!("[Pipeline] session teardown failed: {}", e);
            Ok(summary)
        }
        (Err(e), close) => {
            if let Err(close_err) = close {
                warn!("[Pipeline] session teardown failed: {}", close_err);
            }
            Err(e)
        }
    }
}

async fn run_session(
    driver: &dyn BrowserDriver,
    executor: &dyn RemoteExecutor,
    sink: &dyn HostSink,
    config: &PortalConfig,
) -> AppResult<RunSummary> {
    let session = SessionController::new(driver, config);
    session.authenticate().await?;
    session.reveal_document_list().await?;

    let records = DocumentLister::new(driver, &config.selectors)
        .extract_records()
        .await?;

    let summary = DownloadOrchestrator::new(executor, sink)
        .download_all(records, config.save_dir())
        .await;
    Ok(summary)
}

/// Validate `config`, launch headless Chrome and run the pipeline.
#[cfg(feature = "browser")]
pub async fn run(config: &PortalConfig) -> AppResult<RunSummary> {
    use crate::services::bridge::TransferBridge;
    use crate::services::browser::ChromeSession;

    config.validate().map_err(AppError::config)?;

    let session = ChromeSession::launch(&config.browser).await?;
    let bridge = TransferBridge::new();
    run_with(&session, &session, &bridge, config).await
}

/// Without the `browser` feature there is no session to run against.
#[cfg(not(feature = "browser"))]
pub async fn run(config: &PortalConfig) -> AppResult<RunSummary> {
    config.validate().map_err(AppError::config)?;
    Err(AppError::browser(
        "built without the 'browser' feature; rebuild with `--features browser`",
    ))
}
