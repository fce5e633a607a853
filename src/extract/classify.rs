// src/extract/classify.rs
// =============================================================================
// Link classification.
//
// Every href goes through the same steps:
// 1. Resolve it against the page URL (relative -> absolute)
// 2. Drop anything that is not http(s): mailto:, javascript:, tel:, data:,
//    including authority forms like "javascript://host/.."
// 3. Drop the #fragment so "page#top" and "page" are the same URL
// 4. Drop it entirely if its path ends with an excluded extension
// 5. Compare host + port with the seed: same -> Internal, else External
// =============================================================================

use crate::config::ExtensionFilter;
use url::Url;

/// Which side of the seed's origin a link falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    Internal,
    External,
}

/// Classifies links relative to a fixed seed URL.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    host: String,
    port: Option<u16>,
    excluded: ExtensionFilter,
}

impl LinkClassifier {
    pub fn new(seed: &Url, excluded: ExtensionFilter) -> Self {
        Self {
            host: seed.host_str().unwrap_or_default().to_ascii_lowercase(),
            port: seed.port_or_known_default(),
            excluded,
        }
    }

    /// Resolves `href` against `base` and drops fragments and pseudo-links.
    ///
    /// Returns None for unresolvable hrefs and for anything that is not an
    /// http(s) URL with a host.
    pub fn resolve(&self, base: &Url, href: &str) -> Option<Url> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        let mut url = base.join(href).ok()?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return None;
        }

        url.set_fragment(None);
        Some(url)
    }

    /// Resolves and classifies one href. None means the link is discarded.
    pub fn classify(&self, base: &Url, href: &str) -> Option<(Url, LinkClass)> {
        let url = self.resolve(base, href)?;
        if self.excluded.matches(&url) {
            return None;
        }
        let class = self.class_of(&url);
        Some((url, class))
    }

    /// Internal when host and port both match the seed.
    pub fn class_of(&self, url: &Url) -> LinkClass {
        let same_host = url
            .host_str()
            .map(|h| h.eq_ignore_ascii_case(&self.host))
            .unwrap_or(false);

        if same_host && url.port_or_known_default() == self.port {
            LinkClass::Internal
        } else {
            LinkClass::External
        }
    }
}
