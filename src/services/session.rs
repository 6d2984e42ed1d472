//! Session Controller
//!
//! Drives the portal from its login page to a fully expanded document list.
//! Login success is not verified beyond the submit navigation completing; a
//! rejected login shows up later as an empty extraction.

use std::time::Duration;

use tracing::{debug, info};

use crate::models::config::PortalConfig;
use crate::services::browser::BrowserDriver;
use crate::utils::error::{AppError, AppResult};

/// Login and list-reveal steps over a shared `BrowserDriver`.
pub struct SessionController<'a> {
    driver: &'a dyn BrowserDriver,
    config: &'a PortalConfig,
}

impl<'a> SessionController<'a> {
    pub fn new(driver: &'a dyn BrowserDriver, config: &'a PortalConfig) -> Self {
        Self { driver, config }
    }

    /// Load the login page, fill in the credentials, submit and wait for
    /// the resulting navigation.
    pub async fn authenticate(&self) -> AppResult<()> {
        let selectors = &self.config.selectors;
        info!("[Session] logging in at {}", self.config.url);

        self.driver
            .goto(&self.config.url)
            .await
            .map_err(|e| AppError::auth(format!("could not load login page: {}", e)))?;
        self.driver
            .type_into(&selectors.username, &self.config.username)
            .await
            .map_err(|e| AppError::auth(format!("could not enter username: {}", e)))?;
        self.driver
            .type_into(&selectors.password, &self.config.password)
            .await
            .map_err(|e| AppError::auth(format!("could not enter password: {}", e)))?;
        self.driver
            .submit_and_wait(&selectors.submit)
            .await
            .map_err(|e| AppError::auth(format!("login submit did not complete: {}", e)))?;

        debug!("[Session] login navigation complete");
        Ok(())
    }

    /// Expand the collapsed document list so every row is in the DOM.
    ///
    /// The page keeps rendering after the login navigation, so a fixed
    /// settle delay precedes the click and a shorter one follows it.
    pub async fn reveal_document_list(&self) -> AppResult<()> {
        let timing = &self.config.timing;

        settle(timing.login_settle()).await;
        self.driver
            .click(&self.config.selectors.show_all)
            .await
            .map_err(|e| AppError::navigation(format!("could not reveal document list: {}", e)))?;
        settle(timing.list_settle()).await;

        debug!("[Session] document list revealed");
        Ok(())
    }
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
