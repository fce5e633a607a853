// src/extract/mod.rs
// =============================================================================
// This module turns a fetched page into an ExtractionResult.
//
// Submodules:
// - classify: Resolves hrefs and sorts them into internal / external
// - html: Parses HTML for anchors, scripts and comments
// - email: Finds email addresses in page text
//
// The crawl engine only depends on the Extractor trait and the
// ExtractionResult type defined here.
// =============================================================================

mod classify;
mod email;
mod html;

use std::collections::BTreeSet;
use thiserror::Error;
use url::Url;

pub use classify::{LinkClass, LinkClassifier};
pub use email::extract_emails;
pub use html::HtmlExtractor;

/// Everything found on a single page.
///
/// BTreeSet keeps each category deduplicated and gives stable output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub internal_links: BTreeSet<String>,
    pub external_links: BTreeSet<String>,
    pub emails: BTreeSet<String>,
    pub script_refs: BTreeSet<String>,
    pub comments: BTreeSet<String>,
}

/// Why a fetched page produced no extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("content is binary, not markup ({len} bytes)")]
    BinaryContent { len: usize },
}

/// Something that can pull links and artifacts out of a page body.
pub trait Extractor: Send + Sync {
    fn extract(&self, content: &[u8], base_url: &Url) -> Result<ExtractionResult, ParseError>;
}
