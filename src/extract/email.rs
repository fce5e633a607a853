// src/extract/email.rs
// =============================================================================
// Email address detection.
//
// Pattern: local-part "@" domain "." TLD of 2+ letters.
// Runs over the raw page text, so addresses in mailto: hrefs, attributes and
// visible text are all picked up.
// =============================================================================

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .expect("hardcoded regex pattern is valid")
});

/// Returns every distinct email address found in `text`.
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
