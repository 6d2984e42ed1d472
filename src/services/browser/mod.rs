//! Browser Seam
//!
//! Two capabilities split the work that happens inside the portal's browser
//! context from the work that happens on the host:
//!
//! - `BrowserDriver` - navigation and DOM reads on the authenticated page
//! - `RemoteExecutor` - requests issued from inside the page, so the
//!   session's cookies are attached, returning bodies as `TransportString`s
//!
//! The headless Chrome implementation of both lives in `chrome` and is gated
//! behind the `browser` feature. Tests provide in-memory fakes.

use async_trait::async_trait;
use payslip_core::{RowSnapshot, TransportString};

use crate::utils::error::AppResult;

#[cfg(feature = "browser")]
pub mod chrome;

#[cfg(feature = "browser")]
pub use chrome::ChromeSession;

/// Navigation and DOM access on the single shared page.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Load `url` and wait for the load to finish.
    async fn goto(&self, url: &str) -> AppResult<()>;

    /// Type `text` into the element matching `selector`.
    async fn type_into(&self, selector: &str, text: &str) -> AppResult<()>;

    /// Click the element matching `selector`.
    async fn click(&self, selector: &str) -> AppResult<()>;

    /// Click the element matching `selector` and wait for the navigation it triggers.
    async fn submit_and_wait(&self, selector: &str) -> AppResult<()>;

    /// Read every element matching `row`: the `innerText` of each child
    /// matching `cell`, and the `href` of the first `link` inside each cell.
    async fn snapshot_rows(&self, row: &str, cell: &str, link: &str)
        -> AppResult<Vec<RowSnapshot>>;

    /// Tear the session down. Called once per run.
    async fn close(&self) -> AppResult<()>;
}

/// Runs authenticated requests inside the page context.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// GET `url` with credentials included and return the full body encoded
    /// with the byte channel mapping. Network errors and non-2xx statuses
    /// are `AppError::Fetch`.
    async fn fetch_encoded(&self, url: &str) -> AppResult<TransportString>;
}
