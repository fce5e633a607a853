// src/crawl/engine.rs
// =============================================================================
// The traversal engine.
//
// How it works:
// 1. Put the seed URL in the frontier at depth 0
// 2. Take the next item; skip it if it's too deep or already visited
// 3. Mark it visited, then fetch and extract it (up to `workers` at a time)
// 4. Merge the page's results into the aggregator
// 5. Offer the page's internal links back to the frontier at depth + 1
// 6. Repeat until the frontier is empty or the crawl is cancelled
//
// All crawl state (frontier, visited set, aggregator, stats) is owned by a
// single run() call. Fetches run concurrently as futures polled by that same
// task, so none of the state needs a lock.
// =============================================================================

use super::aggregate::{Aggregator, CrawlReport};
use super::frontier::{Frontier, WorkItem};
use crate::config::CrawlConfig;
use crate::extract::{ExtractionResult, Extractor, ParseError};
use crate::fetch::{FetchError, Fetcher};
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::ProgressBar;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Why one page contributed nothing to the crawl.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPage {
    pub url: String,
    pub depth: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: Vec<FailedPage>,
    pub discarded_too_deep: usize,
}

/// What a crawl hands to the reporting layer.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlOutcome {
    pub report: CrawlReport,
    pub stats: CrawlStats,
    pub interrupted: bool,
}

pub struct Crawler<F, E> {
    config: CrawlConfig,
    fetcher: F,
    extractor: E,
    progress: ProgressBar,
}

impl<F: Fetcher, E: Extractor> Crawler<F, E> {
    pub fn new(config: CrawlConfig, fetcher: F, extractor: E) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            progress: ProgressBar::hidden(),
        }
    }

    /// Ticks `progress` once per finished page (fetched or failed) and shows
    /// the URL currently being crawled as its message.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls from the seed until the frontier is exhausted or `cancel` fires.
    ///
    /// Cancellation is checked between units of work: no new fetch starts
    /// after it is observed, while fetches already in flight finish and are
    /// merged. The returned report only ever contains whole page results.
    pub async fn run(&self, cancel: &CancellationToken) -> CrawlOutcome {
        let config = &self.config;
        let workers = config.effective_workers();

        let mut frontier = Frontier::new(config.search_order, config.excluded.clone());
        let mut aggregator = Aggregator::new();
        let mut stats = CrawlStats::default();
        let mut in_flight = FuturesUnordered::new();
        let mut interrupted = false;

        // Depth of the items currently in flight. Breadth-first never starts
        // a deeper item while shallower ones are still running.
        let mut level = 0;

        tracing::info!(
            seed = %config.seed,
            depth_limit = config.depth_limit,
            order = ?config.search_order,
            workers,
            "starting crawl"
        );

        frontier.offer(config.seed.clone(), 0);

        loop {
            if !interrupted && cancel.is_cancelled() {
                interrupted = true;
                tracing::warn!(
                    in_flight = in_flight.len(),
                    queued = frontier.len(),
                    "crawl interrupted, no new pages will be fetched"
                );
            }

            while !interrupted && in_flight.len() < workers {
                match frontier.peek() {
                    None => break,
                    Some(next) if !in_flight.is_empty() && next.depth > level => break,
                    Some(_) => {}
                }
                let Some(item) = frontier.next() else {
                    break;
                };

                if item.depth > config.depth_limit {
                    tracing::debug!(url = %item.url, depth = item.depth, "too deep, skipping");
                    stats.discarded_too_deep += 1;
                    continue;
                }
                if !frontier.mark_visited(&item.url) {
                    tracing::debug!(url = %item.url, "already visited, skipping");
                    continue;
                }

                tracing::info!(url = %item.url, depth = item.depth, "crawling");
                self.progress.set_message(item.url.to_string());
                level = item.depth;
                in_flight.push(self.process(item));
            }

            let Some((item, outcome)) = in_flight.next().await else {
                break;
            };
            self.progress.inc(1);

            match outcome {
                Ok(result) => {
                    aggregator.merge(&result);
                    stats.pages_fetched += 1;
                    tracing::debug!(
                        url = %item.url,
                        internal = result.internal_links.len(),
                        external = result.external_links.len(),
                        emails = result.emails.len(),
                        scripts = result.script_refs.len(),
                        comments = result.comments.len(),
                        "page merged"
                    );
                    schedule_links(&mut frontier, &result, item.depth + 1);
                }
                Err(e) => {
                    tracing::warn!(url = %item.url, depth = item.depth, error = %e, "page skipped");
                    stats.pages_failed.push(FailedPage {
                        url: item.url.to_string(),
                        depth: item.depth,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.progress.finish_with_message(format!(
            "{} page(s) fetched, {} failed",
            stats.pages_fetched,
            stats.pages_failed.len()
        ));

        tracing::info!(
            pages_fetched = stats.pages_fetched,
            pages_failed = stats.pages_failed.len(),
            merged = aggregator.merges(),
            visited = frontier.visited_count(),
            interrupted,
            "crawl finished"
        );

        CrawlOutcome {
            report: aggregator.snapshot(),
            stats,
            interrupted,
        }
    }

    // Fetching -> Extracting for one work item
    async fn process(&self, item: WorkItem) -> (WorkItem, Result<ExtractionResult, PageError>) {
        let outcome = match self.fetcher.fetch(&item.url, self.config.timeout).await {
            Ok(body) => self
                .extractor
                .extract(&body, &item.url)
                .map_err(PageError::from),
            Err(e) => Err(PageError::from(e)),
        };
        (item, outcome)
    }
}

// External links are never offered: the crawl stays on the seed's origin
fn schedule_links(frontier: &mut Frontier, result: &ExtractionResult, depth: usize) {
    for link in &result.internal_links {
        if let Ok(url) = Url::parse(link) {
            frontier.offer(url, depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtensionFilter, SearchOrder};
    use crate::extract::HtmlExtractor;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const SEED: &str = "https://example.com/";

    fn u(path: &str) -> String {
        Url::parse(SEED).unwrap().join(path).unwrap().to_string()
    }

    // In-memory site: URL -> response, with a log of every fetch
    #[derive(Default)]
    struct GraphFetcher {
        pages: HashMap<String, Result<Vec<u8>, FetchError>>,
        delays: HashMap<String, Duration>,
        cancel_on: Option<(String, CancellationToken)>,
        log: Mutex<Vec<String>>,
    }

    impl GraphFetcher {
        fn page(mut self, path: &str, links: &[&str]) -> Self {
            let html: String = links
                .iter()
                .map(|l| format!(r#"<a href="{}">link</a>"#, l))
                .collect();
            self.pages.insert(u(path), Ok(html.into_bytes()));
            self
        }

        fn respond(mut self, path: &str, response: Result<Vec<u8>, FetchError>) -> Self {
            self.pages.insert(u(path), response);
            self
        }

        fn slow(mut self, path: &str, delay: Duration) -> Self {
            self.delays.insert(u(path), delay);
            self
        }

        fn cancel_when_fetching(mut self, path: &str, token: CancellationToken) -> Self {
            self.cancel_on = Some((u(path), token));
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for GraphFetcher {
        async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<Vec<u8>, FetchError> {
            self.log.lock().unwrap().push(url.to_string());
            if let Some((target, token)) = &self.cancel_on {
                if target == url.as_str() {
                    token.cancel();
                }
            }
            if let Some(delay) = self.delays.get(url.as_str()) {
                tokio::time::sleep(*delay).await;
            }
            self.pages
                .get(url.as_str())
                .cloned()
                .unwrap_or(Err(FetchError::HttpStatus(404)))
        }
    }

    fn crawler(
        graph: GraphFetcher,
        order: SearchOrder,
        depth_limit: usize,
        filter: &str,
    ) -> Crawler<GraphFetcher, HtmlExtractor> {
        let mut config = CrawlConfig::new(SEED).unwrap();
        config.search_order = order;
        config.depth_limit = depth_limit;
        config.excluded = ExtensionFilter::parse(filter);
        config.workers = 4;
        let extractor = HtmlExtractor::new(&config.seed, config.excluded.clone());
        Crawler::new(config, graph, extractor)
    }

    fn position(log: &[String], path: &str) -> usize {
        let target = u(path);
        log.iter()
            .position(|l| *l == target)
            .unwrap_or_else(|| panic!("{} was not fetched", target))
    }

    #[tokio::test]
    async fn test_depth_zero_fetches_only_seed() {
        for order in [SearchOrder::BreadthFirst, SearchOrder::DepthFirst] {
            let graph = GraphFetcher::default()
                .page("/", &["/a", "/b"])
                .page("/a", &[])
                .page("/b", &[]);
            let crawler = crawler(graph, order, 0, "");
            let outcome = crawler.run(&CancellationToken::new()).await;

            assert_eq!(crawler.fetcher().fetched(), vec![u("/")]);
            assert_eq!(outcome.stats.pages_fetched, 1);
            // Links from the seed are still reported
            assert_eq!(outcome.report.internal_links.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_cyclic_graph_fetches_each_url_once() {
        for order in [SearchOrder::BreadthFirst, SearchOrder::DepthFirst] {
            let graph = GraphFetcher::default()
                .page("/", &["/a", "/b"])
                .page("/a", &["/b", "/", "/a#top"])
                .page("/b", &["/a", "/"]);
            let crawler = crawler(graph, order, 5, "");
            crawler.run(&CancellationToken::new()).await;

            let mut fetched = crawler.fetcher().fetched();
            assert_eq!(fetched.len(), 3);
            fetched.sort();
            fetched.dedup();
            assert_eq!(fetched.len(), 3);
        }
    }

    #[tokio::test]
    async fn test_breadth_first_visits_levels_in_order() {
        // seed -> {a, b}, a -> {c}, c -> {d}; b is slow so c is discovered
        // while b is still in flight
        let graph = GraphFetcher::default()
            .page("/", &["/a", "/b"])
            .page("/a", &["/c"])
            .page("/b", &[])
            .page("/c", &["/d"])
            .page("/d", &[])
            .slow("/b", Duration::from_millis(50));
        let crawler = crawler(graph, SearchOrder::BreadthFirst, 2, "");
        let outcome = crawler.run(&CancellationToken::new()).await;

        let log = crawler.fetcher().fetched();
        assert_eq!(log.len(), 4);
        assert_eq!(position(&log, "/"), 0);
        assert!(position(&log, "/a") < position(&log, "/c"));
        assert!(position(&log, "/b") < position(&log, "/c"));
        assert!(!log.contains(&u("/d")));
        assert_eq!(outcome.stats.discarded_too_deep, 1);
    }

    #[tokio::test]
    async fn test_depth_first_finishes_branch_before_backtracking() {
        let graph = GraphFetcher::default()
            .page("/", &["/a", "/b"])
            .page("/a", &["/c"])
            .page("/b", &["/d"])
            .page("/c", &[])
            .page("/d", &[]);
        let crawler = crawler(graph, SearchOrder::DepthFirst, 5, "");
        crawler.run(&CancellationToken::new()).await;

        let log = crawler.fetcher().fetched();
        assert_eq!(log.len(), 5);
        assert_eq!(position(&log, "/c"), position(&log, "/a") + 1);
        assert_eq!(position(&log, "/d"), position(&log, "/b") + 1);
    }

    #[tokio::test]
    async fn test_excluded_extensions_never_fetched() {
        let graph = GraphFetcher::default()
            .page("/", &["/report.pdf", "/page"])
            .page("/report.pdf", &[])
            .page("/page", &[]);
        let crawler = crawler(graph, SearchOrder::BreadthFirst, 3, ".pdf");
        let outcome = crawler.run(&CancellationToken::new()).await;

        let log = crawler.fetcher().fetched();
        assert!(!log.contains(&u("/report.pdf")));
        assert!(log.contains(&u("/page")));
        assert!(!outcome.report.internal_links.contains(&u("/report.pdf")));
        assert!(!outcome.report.external_links.contains(&u("/report.pdf")));
    }

    #[tokio::test]
    async fn test_external_links_recorded_not_crawled() {
        let graph = GraphFetcher::default()
            .page("/", &["https://other.test/x", "mailto:root@example.com"]);
        let crawler = crawler(graph, SearchOrder::BreadthFirst, 3, "");
        let outcome = crawler.run(&CancellationToken::new()).await;

        assert_eq!(crawler.fetcher().fetched(), vec![u("/")]);
        assert!(outcome.report.external_links.contains("https://other.test/x"));
        assert!(outcome.report.internal_links.is_empty());
        assert!(outcome.report.emails.contains("root@example.com"));
    }

    #[tokio::test]
    async fn test_failures_are_not_fatal() {
        let mut latin1 = br#"<p>Men"#.to_vec();
        latin1.push(0xfa); // "ú" in latin-1
        latin1.extend_from_slice(br#"</p><a href="/from-latin1">next</a>"#);

        let graph = GraphFetcher::default()
            .page("/", &["/broken", "/logo", "/legacy", "/ok"])
            .respond("/broken", Err(FetchError::HttpStatus(500)))
            .respond("/logo", Ok(vec![0x89, b'P', b'N', b'G', 0x00, 0x00]))
            .respond("/legacy", Ok(latin1))
            .page("/from-latin1", &[])
            .page("/ok", &["/deeper"])
            .page("/deeper", &[]);
        let crawler = crawler(graph, SearchOrder::BreadthFirst, 3, "");
        let outcome = crawler.run(&CancellationToken::new()).await;

        let log = crawler.fetcher().fetched();
        assert!(log.contains(&u("/deeper")));
        // A non-UTF-8 page is still parsed and followed
        assert!(log.contains(&u("/from-latin1")));
        assert_eq!(outcome.stats.pages_fetched, 5);
        assert_eq!(outcome.stats.pages_failed.len(), 2);

        let broken = outcome
            .stats
            .pages_failed
            .iter()
            .find(|f| f.url == u("/broken"))
            .unwrap();
        assert_eq!(broken.depth, 1);
        assert!(broken.reason.contains("HTTP 500"));

        let logo = outcome
            .stats
            .pages_failed
            .iter()
            .find(|f| f.url == u("/logo"))
            .unwrap();
        assert!(logo.reason.starts_with("parse failed"));
        assert!(!outcome.interrupted);
    }

    #[tokio::test]
    async fn test_interrupt_keeps_only_completed_merges() {
        let token = CancellationToken::new();
        let graph = GraphFetcher::default()
            .page("/", &["/a"])
            .page("/a", &["/b"])
            .page("/b", &["/c"])
            .cancel_when_fetching("/a", token.clone());
        let crawler = crawler(graph, SearchOrder::DepthFirst, 5, "");
        let outcome = crawler.run(&token).await;

        // The in-flight fetch of /a completes and is merged; /b never starts
        assert_eq!(crawler.fetcher().fetched(), vec![u("/"), u("/a")]);
        assert!(outcome.interrupted);
        assert_eq!(outcome.stats.pages_fetched, 2);

        let expected: std::collections::BTreeSet<String> =
            [u("/a"), u("/b")].into_iter().collect();
        assert_eq!(outcome.report.internal_links, expected);
    }

    #[tokio::test]
    async fn test_progress_ticks_once_per_finished_page() {
        let graph = GraphFetcher::default()
            .page("/", &["/a", "/missing"])
            .page("/a", &["/"]);
        let progress = ProgressBar::hidden();
        let crawler =
            crawler(graph, SearchOrder::BreadthFirst, 3, "").with_progress(progress.clone());
        let outcome = crawler.run(&CancellationToken::new()).await;

        // "/missing" is a 404 in the fake site and still counts as finished
        assert_eq!(outcome.stats.pages_fetched, 2);
        assert_eq!(outcome.stats.pages_failed.len(), 1);
        assert_eq!(progress.position(), 3);
        assert!(progress.is_finished());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_fetches_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let graph = GraphFetcher::default().page("/", &["/a"]);
        let crawler = crawler(graph, SearchOrder::BreadthFirst, 5, "");
        let outcome = crawler.run(&token).await;

        assert!(crawler.fetcher().fetched().is_empty());
        assert!(outcome.interrupted);
        assert!(outcome.report.is_empty());
    }
}
