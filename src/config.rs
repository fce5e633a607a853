// src/config.rs
// =============================================================================
// Crawl configuration.
//
// A CrawlConfig is built once from the command line, validated, and then
// shared read-only with the engine for the whole crawl.
// =============================================================================

use crate::cli::Cli;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that stop a crawl before it starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("seed URL has no host: {0}")]
    MissingHost(String),

    #[error("worker count must be at least 1")]
    NoWorkers,
}

/// Order in which the frontier hands out work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// FIFO: every page at depth d before any page at depth d+1
    BreadthFirst,
    /// LIFO: follow one branch to the bottom before backtracking
    DepthFirst,
}

/// Path suffixes that are never classified, queued or fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// Parses a comma separated list such as ".jpg, .png,pdf".
    ///
    /// Entries are trimmed and lowercased; empty entries are dropped so that
    /// an empty flag value filters nothing.
    pub fn parse(list: &str) -> Self {
        let suffixes = list
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { suffixes }
    }

    /// True if the URL's path ends with one of the excluded suffixes.
    pub fn matches(&self, url: &Url) -> bool {
        if self.suffixes.is_empty() {
            return false;
        }
        let path = url.path().to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| path.ends_with(suffix.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// Everything the engine needs to know about one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: Url,
    pub depth_limit: usize,
    pub search_order: SearchOrder,
    pub timeout: Duration,
    pub excluded: ExtensionFilter,
    pub workers: usize,
}

impl CrawlConfig {
    /// Creates a config with the default depth (5), order (depth-first),
    /// timeout (10s) and worker count (8).
    pub fn new(seed: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            seed: parse_seed(seed)?,
            depth_limit: 5,
            search_order: SearchOrder::DepthFirst,
            timeout: Duration::from_secs(10),
            excluded: ExtensionFilter::default(),
            workers: 8,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        let mut config = Self::new(&cli.url)?;
        config.depth_limit = cli.depth;
        config.timeout = Duration::from_secs(cli.timeout);
        config.excluded = ExtensionFilter::parse(&cli.filter);
        config.workers = cli.workers;
        if cli.breadth {
            config.search_order = SearchOrder::BreadthFirst;
        }
        Ok(config)
    }

    /// Number of fetches the engine may keep in flight.
    ///
    /// Depth-first always runs one at a time so a branch is finished before
    /// the next one starts.
    pub fn effective_workers(&self) -> usize {
        match self.search_order {
            SearchOrder::BreadthFirst => self.workers.max(1),
            SearchOrder::DepthFirst => 1,
        }
    }
}

fn parse_seed(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidSeed {
        url: raw.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::MissingHost(raw.to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}
