//! Slug normalization for portal labels.

use regex::Regex;
use std::sync::OnceLock;

struct SlugPatterns {
    whitespace: Regex,
    non_word: Regex,
    hyphen_runs: Regex,
}

fn patterns() -> &'static SlugPatterns {
    static PATTERNS: OnceLock<SlugPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SlugPatterns {
        whitespace: Regex::new(r"\s+").unwrap(),
        // ASCII word characters only; anything else is dropped.
        non_word: Regex::new(r"[^A-Za-z0-9_\-]+").unwrap(),
        hyphen_runs: Regex::new(r"-{2,}").unwrap(),
    })
}

/// Turn free text into a lowercase, hyphen-separated filename token.
///
/// `"Monthly Pay"` becomes `"monthly-pay"`. Whitespace runs become a single
/// hyphen, non-word characters are stripped, repeated hyphens collapse and
/// leading/trailing hyphens are trimmed. The result contains only
/// `[a-z0-9_-]` and applying `slugify` again leaves it unchanged.
pub fn slugify(text: &str) -> String {
    let p = patterns();
    let lowered = text.to_lowercase();
    let hyphenated = p.whitespace.replace_all(&lowered, "-");
    let stripped = p.non_word.replace_all(&hyphenated, "");
    let collapsed = p.hyphen_runs.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
