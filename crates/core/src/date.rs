//! Date normalization for the portal's `D MMM YYYY` cell text.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

/// chrono format for `1 Jan 2024` / `21 Nov 2023`. `%d` accepts one or two digits.
const PORTAL_DATE_FORMAT: &str = "%d %b %Y";

/// ISO calendar date used in filenames.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse portal date text such as `"3 Feb 2023"`.
///
/// Text after the year is ignored, so `"3 Feb 2023 (revised)"` still parses.
pub fn parse_portal_date(text: &str) -> CoreResult<NaiveDate> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_and_remainder(&cleaned, PORTAL_DATE_FORMAT)
        .map(|(date, _rest)| date)
        .map_err(|e| CoreError::parse(format!("'{}' is not a D MMM YYYY date: {}", text.trim(), e)))
}

/// Re-emit portal date text as `YYYY-MM-DD`.
pub fn normalize_date(text: &str) -> CoreResult<String> {
    Ok(parse_portal_date(text)?.format(ISO_DATE_FORMAT).to_string())
}
