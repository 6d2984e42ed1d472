//! Payslip Core
//!
//! Browser-free building blocks for the payslip downloader. Nothing in here
//! touches the network or a browser, so everything is unit-testable.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `codec` - Lossless byte <-> transport string mapping (`TransportString`)
//! - `slug` - Label text to filename token
//! - `date` - `D MMM YYYY` to `YYYY-MM-DD`
//! - `record` - Row snapshots, document records and target paths

pub mod codec;
pub mod date;
pub mod error;
pub mod record;
pub mod slug;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Codec ──────────────────────────────────────────────────────────────
pub use codec::{decode, encode, TransportString, PAGE_ENCODER_JS};

// ── Normalization ──────────────────────────────────────────────────────
pub use date::{normalize_date, parse_portal_date};
pub use slug::slugify;

// ── Records ────────────────────────────────────────────────────────────
pub use record::{CellSnapshot, DocumentRecord, RowSnapshot, DOCUMENT_EXTENSION};
