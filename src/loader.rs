//! Incremental results loader for the catalogue listing
//!
//! Accumulates server pages into one growing list for the current filter
//! snapshot. Every filter change bumps a fencing sequence and starts over at
//! page 1; a page fetch that completes after a newer reset carries a stale
//! fence and is discarded without touching the accumulated items. The async
//! fetch itself lives in the page component; this module is the pure state
//! machine around it.

use std::collections::HashSet;

use crate::api::{Game, PageWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    LoadingMore,
    Ready,
    Failed,
}

/// Identifies one issued page fetch. The fence is compared on completion to
/// detect results superseded by a newer filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub fence: u64,
    pub page: u32,
}

#[derive(Debug, Clone)]
pub struct ResultsLoader {
    items: Vec<Game>,
    seen_ids: HashSet<String>,
    total: usize,
    next_page: u32,
    phase: Phase,
    error: Option<String>,
    fence: u64,
    in_flight: Option<FetchTicket>,
}

impl Default for ResultsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsLoader {
    pub fn new() -> Self {
        ResultsLoader {
            items: Vec::new(),
            seen_ids: HashSet::new(),
            total: 0,
            next_page: 1,
            phase: Phase::Idle,
            error: None,
            fence: 0,
            in_flight: None,
        }
    }

    /// Hard reset for a new filter snapshot: discard everything accumulated,
    /// invalidate any in-flight fetch, and issue a ticket for page 1.
    pub fn reset(&mut self) -> FetchTicket {
        self.fence += 1;
        self.items.clear();
        self.seen_ids.clear();
        self.total = 0;
        self.next_page = 1;
        self.phase = Phase::Loading;
        self.error = None;
        let ticket = FetchTicket { fence: self.fence, page: 1 };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Issue a ticket for the next page. Returns `None` while a fetch is
    /// outstanding, while not `Ready`, or when everything is already loaded;
    /// the caller simply ignores the trigger in those cases.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if self.phase != Phase::Ready || !self.has_more() || self.in_flight.is_some() {
            return None;
        }
        self.phase = Phase::LoadingMore;
        let ticket = FetchTicket { fence: self.fence, page: self.next_page };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Re-issue the fetch that failed, for the same page. Prior pages stay
    /// visible throughout.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.phase != Phase::Failed {
            return None;
        }
        self.phase = if self.items.is_empty() {
            Phase::Loading
        } else {
            Phase::LoadingMore
        };
        self.error = None;
        let ticket = FetchTicket { fence: self.fence, page: self.next_page };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Apply a completed fetch. A ticket from before the latest reset is
    /// stale: the completion is a silent no-op and `false` is returned.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<PageWindow, String>) -> bool {
        if ticket.fence != self.fence {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(window) => {
                self.total = window.total;
                // Defensive dedup against overlapping page windows
                for game in window.items {
                    if self.seen_ids.insert(game.id.clone()) {
                        self.items.push(game);
                    }
                }
                self.next_page = ticket.page + 1;
                self.phase = Phase::Ready;
                self.error = None;
            }
            Err(message) => {
                self.phase = Phase::Failed;
                self.error = Some(message);
            }
        }
        true
    }

    pub fn items(&self) -> &[Game] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.items.len() < self.total
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while any page fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::LoadingMore)
    }

    /// True when a load-more trigger would actually issue a fetch: settled
    /// on a page, no error pending, and pages remaining. The grid re-checks
    /// this after every append in case the sentinel never left the viewport.
    pub fn wants_more(&self) -> bool {
        self.phase == Phase::Ready && self.has_more()
    }

    /// True during the very first load for a snapshot, when there is nothing
    /// to show yet.
    pub fn is_initial_loading(&self) -> bool {
        self.phase == Phase::Loading && self.items.is_empty()
    }

    pub fn is_empty_result(&self) -> bool {
        self.phase == Phase::Ready && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str) -> Game {
        serde_json::from_str(&format!(r#"{{"id": "{}", "title": "Game {}"}}"#, id, id)).unwrap()
    }

    fn page(ids: &[&str], total: usize, page: u32) -> PageWindow {
        PageWindow {
            items: ids.iter().map(|id| game(id)).collect(),
            total,
            page,
            page_size: 12,
        }
    }

    #[test]
    fn test_load_more_accumulation_scenario() {
        let mut loader = ResultsLoader::new();

        let t1 = loader.reset();
        assert!(loader.is_loading());
        assert!(loader.is_initial_loading());

        let ids1: Vec<String> = (0..12).map(|i| format!("a{}", i)).collect();
        let ids1: Vec<&str> = ids1.iter().map(|s| s.as_str()).collect();
        assert!(loader.complete(t1, Ok(page(&ids1, 25, 1))));
        assert_eq!(loader.items().len(), 12);
        assert!(loader.has_more());
        assert!(!loader.is_loading());

        let t2 = loader.load_more().expect("ready with more pages");
        assert_eq!(t2.page, 2);
        let ids2: Vec<String> = (0..12).map(|i| format!("b{}", i)).collect();
        let ids2: Vec<&str> = ids2.iter().map(|s| s.as_str()).collect();
        assert!(loader.complete(t2, Ok(page(&ids2, 25, 2))));
        assert_eq!(loader.items().len(), 24);
        assert!(loader.has_more());
    }

    #[test]
    fn test_overlapping_pages_are_deduplicated() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Ok(page(&["a", "b", "c"], 5, 1)));

        // Page 2 overlaps the end of page 1 (items shifted under fast scroll)
        let t2 = loader.load_more().unwrap();
        loader.complete(t2, Ok(page(&["c", "d", "e"], 5, 2)));

        let ids: Vec<&str> = loader.items().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert!(!loader.has_more());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut loader = ResultsLoader::new();
        let stale = loader.reset();

        // A newer filter change supersedes the in-flight fetch
        let current = loader.reset();

        assert!(!loader.complete(stale, Ok(page(&["old1", "old2"], 2, 1))));
        assert!(loader.items().is_empty());
        assert!(loader.is_loading());

        assert!(loader.complete(current, Ok(page(&["new1"], 1, 1))));
        let ids: Vec<&str> = loader.items().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["new1"]);
    }

    #[test]
    fn test_stale_error_does_not_clobber_newer_snapshot() {
        let mut loader = ResultsLoader::new();
        let stale = loader.reset();
        let current = loader.reset();

        assert!(!loader.complete(stale, Err("network down".to_string())));
        assert!(loader.error().is_none());

        loader.complete(current, Ok(page(&["x"], 1, 1)));
        assert_eq!(loader.items().len(), 1);
    }

    #[test]
    fn test_duplicate_triggers_ignored_while_in_flight() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        // Trigger during initial load
        assert_eq!(loader.load_more(), None);
        loader.complete(t1, Ok(page(&["a"], 3, 1)));

        let t2 = loader.load_more().unwrap();
        // Second trigger while page 2 is outstanding
        assert_eq!(loader.load_more(), None);
        loader.complete(t2, Ok(page(&["b"], 3, 2)));
        assert_eq!(loader.items().len(), 2);
    }

    #[test]
    fn test_trigger_ignored_when_everything_loaded() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Ok(page(&["a", "b"], 2, 1)));
        assert!(!loader.has_more());
        assert_eq!(loader.load_more(), None);
    }

    #[test]
    fn test_failed_load_more_keeps_prior_pages_and_retries_same_page() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Ok(page(&["a", "b"], 4, 1)));

        let t2 = loader.load_more().unwrap();
        assert!(loader.complete(t2, Err("HTTP error: 502".to_string())));
        assert_eq!(loader.items().len(), 2, "prior pages stay visible");
        assert_eq!(loader.error(), Some("HTTP error: 502"));
        assert!(!loader.is_loading());

        let retry = loader.retry().expect("failed state is retryable");
        assert_eq!(retry.page, 2, "retry re-issues the same page");
        loader.complete(retry, Ok(page(&["c", "d"], 4, 2)));
        assert_eq!(loader.items().len(), 4);
        assert!(loader.error().is_none());
        assert!(!loader.has_more());
    }

    #[test]
    fn test_failed_initial_load_retries_page_one() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Err("request failed: timeout".to_string()));
        assert!(loader.items().is_empty());

        let retry = loader.retry().unwrap();
        assert_eq!(retry.page, 1);
        assert!(loader.is_initial_loading());
    }

    #[test]
    fn test_retry_only_from_failed_state() {
        let mut loader = ResultsLoader::new();
        assert_eq!(loader.retry(), None);
        let t1 = loader.reset();
        assert_eq!(loader.retry(), None);
        loader.complete(t1, Ok(page(&["a"], 1, 1)));
        assert_eq!(loader.retry(), None);
    }

    #[test]
    fn test_wants_more_after_short_page() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        assert!(!loader.wants_more(), "nothing to re-trigger while loading");

        // A short page: appended items may not push the sentinel out of view
        loader.complete(t1, Ok(page(&["a", "b"], 10, 1)));
        assert!(loader.wants_more());

        let t2 = loader.load_more().unwrap();
        assert!(!loader.wants_more(), "in-flight fetch suppresses re-trigger");
        loader.complete(t2, Err("HTTP error: 500".to_string()));
        assert!(!loader.wants_more(), "failure waits for an explicit retry");
    }

    #[test]
    fn test_wants_more_after_empty_page_with_remaining_total() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Ok(page(&["a"], 3, 1)));

        // Server returns an empty window while the total still promises more
        let t2 = loader.load_more().unwrap();
        loader.complete(t2, Ok(page(&[], 3, 2)));
        assert!(loader.wants_more());
        let t3 = loader.load_more().expect("next page still issuable");
        assert_eq!(t3.page, 3);
    }

    #[test]
    fn test_empty_result_set() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Ok(page(&[], 0, 1)));
        assert!(loader.is_empty_result());
        assert!(!loader.has_more());
    }

    #[test]
    fn test_reset_while_load_more_in_flight() {
        let mut loader = ResultsLoader::new();
        let t1 = loader.reset();
        loader.complete(t1, Ok(page(&["a"], 3, 1)));
        let stale_more = loader.load_more().unwrap();

        // Filter change arrives before page 2 resolves
        let fresh = loader.reset();
        assert!(loader.items().is_empty());

        assert!(!loader.complete(stale_more, Ok(page(&["b"], 3, 2))));
        assert!(loader.items().is_empty());

        loader.complete(fresh, Ok(page(&["z"], 1, 1)));
        let ids: Vec<&str> = loader.items().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["z"]);
    }
}
