// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first or depth-first traversal from a seed URL
// - Depth limit, checked before any network request is made
// - Each URL fetched at most once, even in cyclic link graphs
// - Only same-origin links are followed
// - Cooperative interruption with partial results
//
// Submodules:
// - frontier: the work queue and visited set
// - aggregate: deduplicated results across all pages
// - engine: the loop tying fetcher, extractor, frontier and aggregator together
// =============================================================================

mod aggregate;
mod engine;
mod frontier;

pub use engine::{CrawlOutcome, Crawler};

#[cfg(test)]
pub use aggregate::CrawlReport;
#[cfg(test)]
pub use engine::CrawlStats;
