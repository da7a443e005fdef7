//! Run statistics
//!
//! Counters updated by the page processor and coordinator, printed once the run
//! has been flushed.

use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run stopped taking new work
    pub finished_at: Option<DateTime<Utc>>,

    /// URLs handed to the page processor
    pub pages_visited: u64,

    /// Pages whose fetch failed (transport error or non-success status)
    pub fetch_failures: u64,

    /// Pages that carried an organization heading
    pub pages_with_name: u64,

    /// In-scope links accepted by the frontier
    pub links_enqueued: u64,

    /// Records appended to the store
    pub records_collected: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            fetch_failures: 0,
            pages_with_name: 0,
            links_enqueued: 0,
            records_collected: 0,
        }
    }

    /// Marks the end of the crawl phase
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Elapsed seconds between start and finish, if finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(secs) = stats.duration_seconds() {
        println!("  Duration: {}s", secs);
    }
    println!();

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited);
    println!("  Fetch failures: {}", stats.fetch_failures);
    println!("  With organization name: {}", stats.pages_with_name);
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!();

    println!("Records collected: {}", stats.records_collected);
}
