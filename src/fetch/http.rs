// src/fetch/http.rs
// =============================================================================
// This module downloads pages with reqwest.
//
// Key functionality:
// - One shared Client for the whole crawl (connection pooling)
// - Per-request timeout taken from the crawl configuration
// - Maps reqwest failures and non-2xx responses onto FetchError
//
// Rust concepts:
// - async/await: Network I/O without blocking the thread
// - Traits: HttpFetcher implements the Fetcher trait from mod.rs
// =============================================================================

use super::{FetchError, Fetcher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Follow at most this many redirects per request.
const MAX_REDIRECTS: usize = 5;

/// Fetcher backed by a reqwest Client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("recon-spider/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(categorize_error)?;

        // Redirects are followed by the client, so anything that is still
        // not 2xx here is a failure
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        // The timeout also covers reading the body
        let body = response.bytes().await.map_err(categorize_error)?;
        Ok(body.to_vec())
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure or refused connection
// - Too many redirects
// - TLS problems, broken bodies, etc.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if let Some(status) = error.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::ConnectionFailed(error.to_string())
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does fetch() take the timeout instead of the Client?
//    - RequestBuilder::timeout() sets a deadline for this request only
//    - It covers connecting, sending, and reading the whole body
//    - The Client stays reusable for any timeout
//
// 2. Why return Vec<u8> instead of String?
//    - Decoding is the extractor's job
//    - A page that is not valid text is a parse failure, not a fetch failure
//
// 3. What does map_err do?
//    - Converts the error inside a Result, leaving Ok values alone
//    - Combined with ?, it turns reqwest::Error into FetchError and returns early
// -----------------------------------------------------------------------------
