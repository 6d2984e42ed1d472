//! Document Lister
//!
//! Scans the revealed list and turns each row into a `DocumentRecord`, in
//! DOM order. Rows with missing or unreadable cells still produce a record;
//! the orchestrator decides what is actionable.

use payslip_core::{normalize_date, slugify, DocumentRecord, RowSnapshot};
use tracing::{debug, info, warn};

use crate::models::config::PortalSelectors;
use crate::services::browser::BrowserDriver;
use crate::utils::error::AppResult;

/// Cell holding the `D MMM YYYY` date
pub const DATE_CELL: usize = 0;
/// Cell holding the free-text document label
pub const LABEL_CELL: usize = 1;
/// Cell holding the download anchor
pub const LINK_CELL: usize = 4;

/// Reads rows through a `BrowserDriver`.
pub struct DocumentLister<'a> {
    driver: &'a dyn BrowserDriver,
    selectors: &'a PortalSelectors,
}

impl<'a> DocumentLister<'a> {
    pub fn new(driver: &'a dyn BrowserDriver, selectors: &'a PortalSelectors) -> Self {
        Self { driver, selectors }
    }

    /// One record per row matching the row selector.
    pub async fn extract_records(&self) -> AppResult<Vec<DocumentRecord>> {
        let rows = self
            .driver
            .snapshot_rows(&self.selectors.row, &self.selectors.cell, &self.selectors.link)
            .await?;

        let records: Vec<DocumentRecord> = rows.iter().map(record_from_row).collect();
        let actionable = records.iter().filter(|r| r.is_actionable()).count();

        if records.is_empty() {
            warn!(
                "[Lister] no rows matched '{}'; the login may have been rejected",
                self.selectors.row
            );
        } else {
            info!(
                "[Lister] found {} rows, {} downloadable",
                records.len(),
                actionable
            );
        }
        Ok(records)
    }
}

/// Build a record from the positional cells of one row.
pub fn record_from_row(row: &RowSnapshot) -> DocumentRecord {
    let date = cell_text(row, DATE_CELL).and_then(|text| match normalize_date(text) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("[Lister] {}", e);
            None
        }
    });

    let doc_type = cell_text(row, LABEL_CELL)
        .map(slugify)
        .filter(|slug| !slug.is_empty());

    let source_url = row
        .cell(LINK_CELL)
        .and_then(|cell| cell.link.clone())
        .filter(|href| !href.trim().is_empty());

    DocumentRecord {
        date,
        doc_type,
        source_url,
    }
}

fn cell_text(row: &RowSnapshot, index: usize) -> Option<&str> {
    row.cell(index).and_then(|cell| cell.text.as_deref())
}
