//! Breadth-first crawl frontier and per-session dedup state.
//!
//! The queue accepts duplicates on purpose: the same URL may be discovered from
//! several referrers before it is first consumed. Eligibility (depth budget and
//! visited set) is decided when a target is popped, never when it is pushed.

use crate::model::{CrawlTarget, ElementSignature};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Visited URLs and activated element signatures for one crawl session.
#[derive(Debug, Default)]
pub struct DedupTracker {
    visited_urls: HashSet<String>,
    visited_signatures: HashSet<ElementSignature>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the URL was not already visited.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited_urls.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_urls.contains(url)
    }

    /// Returns `true` if the signature was not already visited.
    pub fn mark_signature_visited(&mut self, signature: &ElementSignature) -> bool {
        self.visited_signatures.insert(signature.clone())
    }

    pub fn is_signature_visited(&self, signature: &ElementSignature) -> bool {
        self.visited_signatures.contains(signature)
    }
}

/// FIFO queue of pending targets bounded by a depth budget.
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<CrawlTarget>,
    max_depth: usize,
}

impl Frontier {
    pub fn new(max_depth: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max_depth,
        }
    }

    pub fn enqueue(&mut self, target: CrawlTarget) {
        self.queue.push_back(target);
    }

    /// Raw FIFO pop with no eligibility checks.
    pub fn dequeue(&mut self) -> Option<CrawlTarget> {
        self.queue.pop_front()
    }

    /// Pops until an eligible target is found. Targets deeper than the budget or
    /// already visited are discarded for good.
    pub fn next_eligible(&mut self, dedup: &DedupTracker) -> Option<CrawlTarget> {
        while let Some(target) = self.dequeue() {
            if target.depth > self.max_depth {
                debug!(
                    "Discarding {} (depth {} > {})",
                    target.url, target.depth, self.max_depth
                );
                continue;
            }
            if dedup.is_visited(&target.url) {
                debug!("Discarding {} (already visited)", target.url);
                continue;
            }
            return Some(target);
        }
        None
    }

    /// Whether a child discovered at `depth` would still fit the depth budget.
    pub fn accepts_child_of(&self, depth: usize) -> bool {
        depth < self.max_depth
    }

    /// Empties the queue, returning how many targets were dropped.
    pub fn discard_remaining(&mut self) -> usize {
        let remaining = self.queue.len();
        self.queue.clear();
        remaining
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new(3);
        frontier.enqueue(CrawlTarget::new("http://a.test/1", 1));
        frontier.enqueue(CrawlTarget::new("http://a.test/2", 1));
        frontier.enqueue(CrawlTarget::new("http://a.test/3", 2));

        let dedup = DedupTracker::new();
        let order: Vec<String> = std::iter::from_fn(|| frontier.next_eligible(&dedup))
            .map(|t| t.url)
            .collect();
        assert_eq!(
            order,
            vec!["http://a.test/1", "http://a.test/2", "http://a.test/3"]
        );
    }

    #[test]
    fn test_duplicates_are_allowed_to_queue() {
        let mut frontier = Frontier::new(3);
        frontier.enqueue(CrawlTarget::new("http://a.test/x", 1));
        frontier.enqueue(CrawlTarget::new("http://a.test/x", 1));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_visited_targets_are_discarded_at_dequeue() {
        let mut frontier = Frontier::new(3);
        let mut dedup = DedupTracker::new();
        frontier.enqueue(CrawlTarget::new("http://a.test/x", 1));
        frontier.enqueue(CrawlTarget::new("http://a.test/x", 1));
        frontier.enqueue(CrawlTarget::new("http://a.test/y", 1));

        let first = frontier.next_eligible(&dedup).unwrap();
        assert_eq!(first.url, "http://a.test/x");
        dedup.mark_visited(&first.url);

        let second = frontier.next_eligible(&dedup).unwrap();
        assert_eq!(second.url, "http://a.test/y");
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_too_deep_targets_are_discarded_not_requeued() {
        let mut frontier = Frontier::new(1);
        let dedup = DedupTracker::new();
        frontier.enqueue(CrawlTarget::new("http://a.test/deep", 2));
        frontier.enqueue(CrawlTarget::new("http://a.test/ok", 1));

        let target = frontier.next_eligible(&dedup).unwrap();
        assert_eq!(target.url, "http://a.test/ok");
        assert!(frontier.next_eligible(&dedup).is_none());
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_child_depth_budget() {
        let frontier = Frontier::new(1);
        assert!(frontier.accepts_child_of(0));
        assert!(!frontier.accepts_child_of(1));

        let flat = Frontier::new(0);
        assert!(!flat.accepts_child_of(0));
    }

    #[test]
    fn test_discard_remaining() {
        let mut frontier = Frontier::new(3);
        frontier.enqueue(CrawlTarget::new("http://a.test/a", 1));
        frontier.enqueue(CrawlTarget::new("http://a.test/b", 1));
        assert_eq!(frontier.discard_remaining(), 2);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_signature_dedup() {
        let mut dedup = DedupTracker::new();
        let sig = ElementSignature::new("button", "Go", "submit");
        assert!(!dedup.is_signature_visited(&sig));
        assert!(dedup.mark_signature_visited(&sig));
        assert!(!dedup.mark_signature_visited(&sig));
        assert!(dedup.is_signature_visited(&sig));
    }
}
