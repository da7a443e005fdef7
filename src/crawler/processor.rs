//! Page processor - one unit of crawl work
//!
//! Fetch a page, turn its contacts into records, and feed its in-scope links
//! back into the frontier. Failures are logged and contained here; nothing a
//! single page does can stop the crawl.

use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::output::CrawlStatistics;
use crate::storage::RecordStore;
use crate::url::in_scope;
use reqwest::Client;
use url::Url;

/// What happened to a processed page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was fetched and parsed
    Processed {
        /// Whether an organization name was found
        has_name: bool,
        /// Records appended to the store
        records: usize,
        /// New URLs accepted by the frontier
        links_enqueued: usize,
    },

    /// The fetch failed; the URL is skipped
    FetchFailed,
}

/// Fetches and processes pages for a single target domain
pub struct PageProcessor {
    client: Client,
    extractor: Extractor,
    target_domain: String,
}

impl PageProcessor {
    pub fn new(client: Client, extractor: Extractor, target_domain: impl Into<String>) -> Self {
        Self {
            client,
            extractor,
            target_domain: target_domain.into(),
        }
    }

    pub fn target_domain(&self) -> &str {
        &self.target_domain
    }

    /// Processes a single URL
    ///
    /// 1. Fetches the page; on failure logs and returns `FetchFailed`
    /// 2. Appends one record per (phone, email) pair when the page has a name
    /// 3. Enqueues every in-scope link not seen before
    pub async fn process(
        &self,
        url: &Url,
        frontier: &mut Frontier,
        records: &RecordStore,
        stats: &mut CrawlStatistics,
    ) -> PageOutcome {
        stats.pages_visited += 1;

        let body = match fetch_url(&self.client, url).await {
            FetchResult::Success {
                body,
                status_code,
                final_url,
            } => {
                tracing::debug!("Fetched {} (HTTP {}, final URL {})", url, status_code, final_url);
                body
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Failed to retrieve {}: HTTP {}", url, status_code);
                stats.fetch_failures += 1;
                return PageOutcome::FetchFailed;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to retrieve {}: {}", url, error);
                stats.fetch_failures += 1;
                return PageOutcome::FetchFailed;
            }
        };

        // Relative links resolve against the requested URL, not the post-redirect one.
        let page = self.extractor.parse_page(&body, url);

        let has_name = page.extraction.name.is_some();
        let mut appended = 0;
        if let Some(name) = &page.extraction.name {
            stats.pages_with_name += 1;
            for record in page.extraction.records() {
                records.push(record);
                appended += 1;
            }
            tracing::debug!("{}: '{}' yielded {} records", url, name, appended);
        } else {
            tracing::debug!("{}: no organization heading", url);
        }
        stats.records_collected += appended as u64;

        let mut links_enqueued = 0;
        for link in page.links {
            if let Some(link) = in_scope(link, &self.target_domain) {
                if frontier.enqueue(link) {
                    links_enqueued += 1;
                }
            }
        }
        stats.links_enqueued += links_enqueued as u64;

        PageOutcome::Processed {
            has_name,
            records: appended,
            links_enqueued,
        }
    }
}
