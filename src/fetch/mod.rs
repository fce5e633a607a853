// src/fetch/mod.rs
// =============================================================================
// This module defines how pages are downloaded.
//
// The crawl engine only knows about the Fetcher trait. The real
// implementation (HttpFetcher) uses reqwest; tests plug in an in-memory
// fake that serves a synthetic link graph.
//
// Submodules:
// - http: reqwest-backed Fetcher and error classification
// =============================================================================

mod http;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use http::HttpFetcher;

/// Why a page could not be fetched.
///
/// Every variant is non-fatal: the engine logs it, drops the page and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("HTTP {0}")]
    HttpStatus(u16),
}

/// Something that can download a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the raw body of `url`, giving up after `timeout`.
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}
