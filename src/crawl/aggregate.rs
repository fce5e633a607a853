// src/crawl/aggregate.rs
// =============================================================================
// Accumulates extraction results across the whole crawl.
// =============================================================================

use crate::extract::ExtractionResult;
use serde::Serialize;
use std::collections::BTreeSet;

/// Read-only view of everything collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub internal_links: BTreeSet<String>,
    pub external_links: BTreeSet<String>,
    pub emails: BTreeSet<String>,
    pub script_refs: BTreeSet<String>,
    pub comments: BTreeSet<String>,
}

impl CrawlReport {
    pub fn is_empty(&self) -> bool {
        self.internal_links.is_empty()
            && self.external_links.is_empty()
            && self.emails.is_empty()
            && self.script_refs.is_empty()
            && self.comments.is_empty()
    }
}

/// Set-union accumulator. merge() is the only way to change it.
#[derive(Debug, Default)]
pub struct Aggregator {
    state: CrawlReport,
    merges: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions every category of `result` into the aggregate.
    ///
    /// Merging the same result again changes nothing.
    pub fn merge(&mut self, result: &ExtractionResult) {
        let state = &mut self.state;
        state.internal_links.extend(result.internal_links.iter().cloned());
        state.external_links.extend(result.external_links.iter().cloned());
        state.emails.extend(result.emails.iter().cloned());
        state.script_refs.extend(result.script_refs.iter().cloned());
        state.comments.extend(result.comments.iter().cloned());
        self.merges += 1;
    }

    pub fn snapshot(&self) -> CrawlReport {
        self.state.clone()
    }

    /// How many page results have been merged.
    pub fn merges(&self) -> usize {
        self.merges
    }
}
