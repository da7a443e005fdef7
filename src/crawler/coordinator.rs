//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop, including:
//! - Seeding the frontier and deriving the target domain
//! - Driving the page processor with a fixed pacing delay
//! - Stopping on an empty frontier, the page ceiling, or an interrupt
//! - Flushing the collected records exactly once

use crate::config::Config;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::frontier::Frontier;
use crate::crawler::processor::PageProcessor;
use crate::output::{CrawlStatistics, CsvSink, Flusher, RecordSink};
use crate::state::{CrawlPhase, StopReason};
use crate::storage::RecordStore;
use crate::url::extract_domain;
use crate::{CrawlError, UrlError};
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Log a progress line every this many pages
const PROGRESS_INTERVAL: u64 = 10;

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Why the crawl stopped taking new work
    pub stop_reason: StopReason,

    /// Records written by the flush
    pub records_written: usize,

    /// Counters for the run
    pub statistics: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// Owns all crawl state for one run. The flush path only sees the record store
/// (through the `Flusher`), never the frontier.
pub struct Coordinator {
    config: Config,
    processor: PageProcessor,
    frontier: Frontier,
    records: RecordStore,
    flusher: Flusher,
    stats: CrawlStatistics,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator that writes its records to the configured CSV file
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - The URL the crawl starts from; its host becomes the crawl scope
    pub fn new(config: Config, seed: Url) -> Result<Self, CrawlError> {
        let sink = CsvSink::new(&config.output.csv_path);
        Self::with_sink(config, seed, Box::new(sink))
    }

    /// Creates a coordinator with an explicit record sink
    pub fn with_sink(
        config: Config,
        seed: Url,
        sink: Box<dyn RecordSink + Send + Sync>,
    ) -> Result<Self, CrawlError> {
        let target_domain = extract_domain(&seed).ok_or(UrlError::MissingDomain)?;
        let client = build_http_client(&config)?;
        let extractor = Extractor::new(&config.extractor.name_selector)?;
        let records = RecordStore::new();

        tracing::info!("Target domain: {}", target_domain);

        Ok(Self {
            processor: PageProcessor::new(client, extractor, target_domain),
            frontier: Frontier::new(seed),
            flusher: Flusher::new(sink, records.clone()),
            records,
            stats: CrawlStatistics::new(),
            phase: CrawlPhase::Running,
            config,
        })
    }

    /// The host every crawled URL must have
    pub fn target_domain(&self) -> &str {
        self.processor.target_domain()
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Shared handle to the collected records
    pub fn records(&self) -> RecordStore {
        self.records.clone()
    }

    /// Runs the crawl to completion and flushes the records
    ///
    /// The loop stops when the frontier is empty, when `max_pages` URLs have been
    /// visited, or when `cancel` is triggered. The token is checked between pages
    /// and during the pacing delay; an in-flight fetch is allowed to finish.
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - Records were written
    /// * `Err(CrawlError::Output)` - The flush failed
    /// * `Err(CrawlError::InvalidTransition)` - The coordinator already ran
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<RunSummary, CrawlError> {
        if self.phase.is_terminal() {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: CrawlPhase::Flushing,
            });
        }

        let stop_reason = self.crawl(&cancel).await;
        self.stats.finish();

        self.phase = self.phase.transition(CrawlPhase::Flushing)?;
        tracing::info!(
            "Crawl stopped ({}): {} pages visited, {} records collected",
            stop_reason,
            self.frontier.visited_len(),
            self.records.len()
        );

        let flushed = self.flusher.flush();
        self.phase = self.phase.transition(CrawlPhase::Done)?;

        let records_written = flushed?;
        Ok(RunSummary {
            stop_reason,
            records_written,
            statistics: self.stats.clone(),
        })
    }

    async fn crawl(&mut self, cancel: &CancellationToken) -> StopReason {
        let delay = Duration::from_millis(self.config.crawler.delay_ms);
        let max_pages = self.config.crawler.max_pages;
        let start_time = std::time::Instant::now();

        loop {
            if cancel.is_cancelled() {
                tracing::info!("Interrupt received, stopping crawl");
                return StopReason::Interrupted;
            }

            let url = match self.frontier.dequeue() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier is empty, crawl complete");
                    return StopReason::FrontierExhausted;
                }
            };

            tracing::info!("Processing {}", url);
            self.processor
                .process(&url, &mut self.frontier, &self.records, &mut self.stats)
                .await;

            if self.stats.pages_visited % PROGRESS_INTERVAL == 0 {
                let rate = self.stats.pages_visited as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages visited, {} in frontier, {} records, {:.2} pages/sec",
                    self.stats.pages_visited,
                    self.frontier.pending_len(),
                    self.records.len(),
                    rate
                );
            }

            if !delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = cancel.cancelled() => {}
                }
            }

            if self.frontier.visited_len() >= max_pages {
                tracing::info!("Reached page limit of {}", max_pages);
                return StopReason::PageLimit;
            }
        }
    }
}

/// Spawns a task that turns Ctrl+C into a cancellation
///
/// The first signal cancels `token`. Later signals are logged and ignored, so
/// the flush that follows the first one is never started twice.
pub fn spawn_interrupt_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        cancel_on_signals(token, tokio::signal::ctrl_c).await;
    })
}

/// Cancels `token` on the first signal and keeps consuming later ones
///
/// Returns the number of signals received once the signal source fails.
async fn cancel_on_signals<F, Fut>(token: CancellationToken, mut next_signal: F) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let mut received = 0;
    loop {
        if let Err(e) = next_signal().await {
            tracing::error!("Failed to listen for interrupt signal: {}", e);
            return received;
        }

        received += 1;
        if received == 1 {
            tracing::info!("Interrupt received, saving collected data after the current page");
            token.cancel();
        } else {
            tracing::warn!("Interrupt already received, saving collected data");
        }
    }
}

/// Runs a complete crawl from `seed`, flushing on completion or Ctrl+C
///
/// # Example
///
/// ```no_run
/// use contact_crawler::config::Config;
/// use contact_crawler::crawler::run_crawl;
/// use contact_crawler::url::parse_seed_url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = parse_seed_url("https://example.com/")?;
/// let summary = run_crawl(Config::default(), seed).await?;
/// println!("{} records written", summary.records_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, seed: Url) -> Result<RunSummary, CrawlError> {
    let mut coordinator = Coordinator::new(config, seed)?;

    let cancel = CancellationToken::new();
    let listener = spawn_interrupt_listener(cancel.clone());

    let result = coordinator.run(cancel).await;
    listener.abort();
    result
}
