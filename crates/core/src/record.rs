//! Document Records
//!
//! `RowSnapshot` is the raw text read from one row of the portal's document
//! list; `DocumentRecord` is the normalized metadata extracted from it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension of every saved document.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// One child cell of a list row as read from the DOM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// `innerText` of the cell.
    pub text: Option<String>,
    /// Resolved `href` of the first anchor inside the cell, if any.
    pub link: Option<String>,
}

impl CellSnapshot {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            link: None,
        }
    }

    pub fn link(href: impl Into<String>) -> Self {
        Self {
            text: None,
            link: Some(href.into()),
        }
    }
}

/// Positional cells of one list row, in DOM order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub cells: Vec<CellSnapshot>,
}

impl RowSnapshot {
    pub fn new(cells: Vec<CellSnapshot>) -> Self {
        Self { cells }
    }

    /// Cell at `index`, if the row has that many cells.
    pub fn cell(&self, index: usize) -> Option<&CellSnapshot> {
        self.cells.get(index)
    }
}

/// Metadata for one discoverable pay document.
///
/// Fields that could not be read stay `None`. A record is actionable only
/// when all three are present; see [`DocumentRecord::is_actionable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Calendar date as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Slug of the portal's label, e.g. `monthly-pay`.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    /// Download link, valid only inside the authenticated browser context.
    pub source_url: Option<String>,
}

impl DocumentRecord {
    /// Names of the fields that are missing or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.date) {
            missing.push("date");
        }
        if is_blank(&self.doc_type) {
            missing.push("type");
        }
        if is_blank(&self.source_url) {
            missing.push("sourceUrl");
        }
        missing
    }

    pub fn is_actionable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// `{date}-{type}.pdf`, when both parts are known.
    pub fn file_name(&self) -> Option<String> {
        match (&self.date, &self.doc_type) {
            (Some(date), Some(doc_type)) if !date.is_empty() && !doc_type.is_empty() => {
                Some(format!("{}-{}.{}", date, doc_type, DOCUMENT_EXTENSION))
            }
            _ => None,
        }
    }

    /// `{save_dir}/{date}-{type}.pdf`. Identical date and type always map to
    /// the same path.
    pub fn target_path(&self, save_dir: &Path) -> Option<PathBuf> {
        self.file_name().map(|name| save_dir.join(name))
    }
}

impl fmt::Display for DocumentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.date.as_deref().unwrap_or("?"),
            self.doc_type.as_deref().unwrap_or("?")
        )
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
