// src/extract/html.rs
// =============================================================================
// This module extracts links and artifacts from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Keeps comment nodes in the tree, so we can read them back
//
// What we collect from one page:
// - <a href>      -> internal / external links (via LinkClassifier)
// - <script src>  -> script references
// - <!-- ... -->  -> comments
// - any text      -> email addresses (via email.rs)
// =============================================================================

use super::{extract_emails, ExtractionResult, Extractor, LinkClass, LinkClassifier, ParseError};
use crate::config::ExtensionFilter;
use scraper::{Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("hardcoded selector is valid"));

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("hardcoded selector is valid"));

/// Extractor for HTML pages, classifying links against a seed URL.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    classifier: LinkClassifier,
}

impl HtmlExtractor {
    pub fn new(seed: &Url, excluded: ExtensionFilter) -> Self {
        Self {
            classifier: LinkClassifier::new(seed, excluded),
        }
    }
}

impl Extractor for HtmlExtractor {
    fn extract(&self, content: &[u8], base_url: &Url) -> Result<ExtractionResult, ParseError> {
        // NUL bytes never show up in markup; this is an image, archive, etc.
        if content.contains(&0) {
            return Err(ParseError::BinaryContent { len: content.len() });
        }

        // Pages served as latin-1 / windows-1252 still carry ASCII markup,
        // so a lossy decode keeps their links, emails and comments
        let text = String::from_utf8_lossy(content);
        let document = Html::parse_document(&text);
        let mut result = ExtractionResult::default();

        for element in document.select(&ANCHOR_SELECTOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            match self.classifier.classify(base_url, href) {
                Some((url, LinkClass::Internal)) => {
                    result.internal_links.insert(url.into());
                }
                Some((url, LinkClass::External)) => {
                    result.external_links.insert(url.into());
                }
                None => {}
            }
        }

        // Script references are recorded wherever they live; they are
        // not links to crawl, so no origin or extension filtering applies
        for element in document.select(&SCRIPT_SELECTOR) {
            if let Some(src) = element.value().attr("src") {
                if let Some(url) = self.classifier.resolve(base_url, src) {
                    result.script_refs.insert(url.into());
                }
            }
        }

        for node in document.tree.values() {
            if let Node::Comment(comment) = node {
                let comment = comment.trim();
                if !comment.is_empty() {
                    result.comments.insert(comment.to_string());
                }
            }
        }

        result.emails = extract_emails(&text);

        Ok(result)
    }
}
