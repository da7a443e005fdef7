//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Contact and link extraction
//! - The frontier queue
//! - Per-page processing and overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod processor;

pub use coordinator::{run_crawl, spawn_interrupt_listener, Coordinator, RunSummary};
pub use extractor::{Extraction, Extractor, ParsedPage};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::Frontier;
pub use processor::{PageOutcome, PageProcessor};
