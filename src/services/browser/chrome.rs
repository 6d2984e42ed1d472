//! Headless Chrome Session
//!
//! `BrowserDriver` and `RemoteExecutor` on top of chromiumoxide. One browser
//! process and one page are shared by every caller for the whole run; the
//! CDP handler is driven on its own tokio task until `close`.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use payslip_core::{CellSnapshot, RowSnapshot, TransportString, PAGE_ENCODER_JS};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{BrowserDriver, RemoteExecutor};
use crate::models::config::BrowserOptions;
use crate::utils::error::{AppError, AppResult};

/// Result object built by [`fetch_script`] inside the page.
#[derive(Debug, Deserialize)]
struct InPageFetch {
    ok: bool,
    #[serde(default)]
    status: u16,
    #[serde(default)]
    body: Option<TransportString>,
    #[serde(default)]
    error: Option<String>,
}

/// Live browser, its page and the CDP handler task.
pub struct ChromeSession {
    page: Page,
    browser: Mutex<Option<Browser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl ChromeSession {
    /// Launch Chrome and open a blank page.
    pub async fn launch(options: &BrowserOptions) -> AppResult<Self> {
        let config = browser_config(options)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::browser(format!("failed to launch Chrome: {}", e)))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("[Chrome] handler stopped: {}", e);
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::browser(format!("failed to open page: {}", e)))?;

        info!("[Chrome] launched (headless: {})", options.headless);
        Ok(Self {
            page,
            browser: Mutex::new(Some(browser)),
            handler: Mutex::new(Some(handler_task)),
        })
    }

    async fn element(&self, selector: &str) -> AppResult<Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| AppError::navigation(format!("no element matches '{}': {}", selector, e)))
    }

    async fn snapshot_cell(cell: &Element, link: &str) -> AppResult<CellSnapshot> {
        let text = cell.inner_text().await.map_err(cdp_error)?;
        let link = match cell.find_element(link).await {
            Ok(anchor) => anchor
                .property("href")
                .await
                .map_err(cdp_error)?
                .and_then(|v| v.as_str().map(str::to_string)),
            Err(_) => None,
        };
        Ok(CellSnapshot { text, link })
    }
}

#[async_trait]
impl BrowserDriver for ChromeSession {
    async fn goto(&self, url: &str) -> AppResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::navigation(format!("failed to load {}: {}", url, e)))?;
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> AppResult<()> {
        self.element(selector)
            .await?
            .click()
            .await
            .map_err(cdp_error)?
            .type_str(text)
            .await
            .map_err(cdp_error)?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        self.element(selector).await?.click().await.map_err(cdp_error)?;
        Ok(())
    }

    async fn submit_and_wait(&self, selector: &str) -> AppResult<()> {
        self.click(selector).await?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| AppError::navigation(format!("navigation did not complete: {}", e)))?;
        Ok(())
    }

    async fn snapshot_rows(
        &self,
        row: &str,
        cell: &str,
        link: &str,
    ) -> AppResult<Vec<RowSnapshot>> {
        let rows = self.page.find_elements(row).await.map_err(cdp_error)?;
        let mut snapshots = Vec::with_capacity(rows.len());
        for row_element in rows {
            let cells = row_element.find_elements(cell).await.map_err(cdp_error)?;
            let mut snapshot = RowSnapshot::default();
            for cell_element in &cells {
                snapshot.cells.push(Self::snapshot_cell(cell_element, link).await?);
            }
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }

    async fn close(&self) -> AppResult<()> {
        if let Some(mut browser) = self.browser.lock().await.take() {
            browser
                .close()
                .await
                .map_err(|e| AppError::browser(format!("failed to close Chrome: {}", e)))?;
            if let Err(e) = browser.wait().await {
                warn!("[Chrome] browser process did not exit cleanly: {}", e);
            }
        }
        if let Some(handler) = self.handler.lock().await.take() {
            let _ = handler.await;
        }
        info!("[Chrome] closed");
        Ok(())
    }
}

#[async_trait]
impl RemoteExecutor for ChromeSession {
    async fn fetch_encoded(&self, url: &str) -> AppResult<TransportString> {
        let params = EvaluateParams::builder()
            .expression(fetch_script(url)?)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(AppError::fetch)?;

        let result: InPageFetch = self
            .page
            .evaluate(params)
            .await
            .map_err(|e| AppError::fetch(format!("in-page fetch of {} failed: {}", url, e)))?
            .into_value()
            .map_err(|e| AppError::fetch(format!("unexpected fetch result for {}: {}", url, e)))?;

        if !result.ok {
            return Err(AppError::fetch(match result.error {
                Some(error) => format!("request for {} failed: {}", url, error),
                None => format!("request for {} returned HTTP {}", url, result.status),
            }));
        }
        result
            .body
            .ok_or_else(|| AppError::fetch(format!("request for {} returned no body", url)))
    }
}

/// Translate `BrowserOptions` into a chromiumoxide launch config.
fn browser_config(options: &BrowserOptions) -> AppResult<BrowserConfig> {
    let mut builder = BrowserConfig::builder().request_timeout(options.request_timeout());
    if !options.headless {
        builder = builder.with_head();
    }
    if let Some(executable) = &options.executable {
        builder = builder.chrome_executable(executable);
    }
    builder.build().map_err(AppError::browser)
}

/// In-page script: fetch with the session's cookies, encode the body with
/// the byte channel mapping, and resolve to an `InPageFetch` object.
fn fetch_script(url: &str) -> AppResult<String> {
    let url_literal = serde_json::to_string(url)?;
    Ok(format!(
        r#"(async () => {{
    const encode = {encoder};
    try {{
        const response = await fetch({url}, {{ method: 'GET', credentials: 'include' }});
        if (!response.ok) {{
            return {{ ok: false, status: response.status }};
        }}
        return {{ ok: true, status: response.status, body: encode(await response.arrayBuffer()) }};
    }} catch (e) {{
        return {{ ok: false, status: 0, error: String(e) }};
    }}
}})()"#,
        encoder = PAGE_ENCODER_JS,
        url = url_literal,
    ))
}

fn cdp_error(e: chromiumoxide::error::CdpError) -> AppError {
    AppError::browser(e.to_string())
}
