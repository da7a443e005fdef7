//! Crawl frontier
//!
//! FIFO queue of pending URLs with a visited-set guard. A URL enters the queue
//! at most once per run and is marked visited the moment it is handed out,
//! so a failed fetch is never retried.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Pending URLs in discovery order, plus everything already handed out
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    pending: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed: Url) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(seed);
        frontier
    }

    /// Appends a URL unless it is already pending or visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was added
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) || self.pending.contains(&url) {
            return false;
        }
        self.pending.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Removes the earliest pending URL and marks it visited
    pub fn dequeue(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.pending.remove(&url);
        self.visited.insert(url.clone());
        Some(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs waiting to be processed
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs handed out so far
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    pub fn is_pending(&self, url: &Url) -> bool {
        self.pending.contains(url)
    }
}
