//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for page content
//! - Classifying failures so the caller can log and skip them

use crate::config::Config;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use contact_crawler::config::Config;
/// use contact_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, mapping every failure to a `FetchResult` variant
///
/// There is no retry: a failed URL is reported once and the crawl moves on.
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success |
/// | Any other status | HttpError |
/// | Timeout | NetworkError |
/// | Connection refused / DNS / TLS | NetworkError |
/// | Body could not be read | NetworkError |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}
