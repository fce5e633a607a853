// src/crawl/frontier.rs
// =============================================================================
// The frontier: pages waiting to be crawled, plus the set of pages already
// visited.
//
// How it works:
// - offer() adds a (url, depth) pair unless it was already visited or its
//   extension is filtered out
// - next() hands out the next pair: front of the queue for breadth-first,
//   back of the queue (a stack) for depth-first
// - mark_visited() is called by the engine right before it fetches a page
//
// Dedup happens when an item is processed, not when it is offered. The same
// URL may sit in the queue twice if two pages link to it before either copy
// is popped; the second copy is dropped when it comes out.
// =============================================================================

use crate::config::{ExtensionFilter, SearchOrder};
use std::collections::{HashSet, VecDeque};
use url::Url;

// One unit of work for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: Url,
    pub depth: usize, // How many link hops from the seed
}

#[derive(Debug)]
pub struct Frontier {
    order: SearchOrder,
    queue: VecDeque<WorkItem>,
    visited: HashSet<String>,
    excluded: ExtensionFilter,
}

impl Frontier {
    pub fn new(order: SearchOrder, excluded: ExtensionFilter) -> Self {
        Self {
            order,
            queue: VecDeque::new(),
            visited: HashSet::new(),
            excluded,
        }
    }

    /// Queues `url` at `depth`. Returns false if it was rejected.
    pub fn offer(&mut self, url: Url, depth: usize) -> bool {
        if self.is_visited(&url) || self.excluded.matches(&url) {
            return false;
        }
        self.queue.push_back(WorkItem { url, depth });
        true
    }

    /// Removes the next item according to the search order.
    pub fn next(&mut self) -> Option<WorkItem> {
        match self.order {
            SearchOrder::BreadthFirst => self.queue.pop_front(),
            SearchOrder::DepthFirst => self.queue.pop_back(),
        }
    }

    /// The item next() would return, without removing it.
    pub fn peek(&self) -> Option<&WorkItem> {
        match self.order {
            SearchOrder::BreadthFirst => self.queue.front(),
            SearchOrder::DepthFirst => self.queue.back(),
        }
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Records `url` as visited. Returns false if it already was.
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why one VecDeque for both orders?
//    - push_back() + pop_front() is a FIFO queue (breadth-first)
//    - push_back() + pop_back() is a LIFO stack (depth-first)
//    - An explicit stack instead of recursion keeps deep sites from
//      overflowing the call stack
//
// 2. Why store visited URLs as String?
//    - Url is normalized on parse, so its string form is a stable key
//    - Fragments are already stripped by the link classifier
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse("https://example.com/").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_breadth_first_is_fifo() {
        let mut frontier = Frontier::new(SearchOrder::BreadthFirst, ExtensionFilter::default());
        frontier.offer(url("/a"), 1);
        frontier.offer(url("/b"), 1);
        assert_eq!(frontier.peek().unwrap().url, url("/a"));
        assert_eq!(frontier.next().unwrap().url, url("/a"));
        assert_eq!(frontier.next().unwrap().url, url("/b"));
        assert!(frontier.next().is_none());
    }

    #[test]
    fn test_depth_first_is_lifo() {
        let mut frontier = Frontier::new(SearchOrder::DepthFirst, ExtensionFilter::default());
        frontier.offer(url("/a"), 1);
        frontier.offer(url("/b"), 1);
        assert_eq!(frontier.peek().unwrap().url, url("/b"));
        assert_eq!(frontier.next().unwrap().url, url("/b"));
        assert_eq!(frontier.next().unwrap().url, url("/a"));
    }

    #[test]
    fn test_offer_does_not_mark_visited() {
        let mut frontier = Frontier::new(SearchOrder::BreadthFirst, ExtensionFilter::default());
        assert!(frontier.offer(url("/a"), 1));
        assert!(frontier.offer(url("/a"), 2));
        assert_eq!(frontier.len(), 2);
        assert!(!frontier.is_visited(&url("/a")));
    }

    #[test]
    fn test_visited_urls_are_rejected() {
        let mut frontier = Frontier::new(SearchOrder::BreadthFirst, ExtensionFilter::default());
        assert!(frontier.mark_visited(&url("/a")));
        assert!(!frontier.mark_visited(&url("/a")));
        assert!(!frontier.offer(url("/a"), 1));
        assert!(frontier.is_empty());
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_excluded_extension_is_rejected() {
        let mut frontier = Frontier::new(SearchOrder::BreadthFirst, ExtensionFilter::parse(".png"));
        assert!(!frontier.offer(url("/logo.png"), 1));
        assert!(frontier.offer(url("/logo"), 1));
    }
}
