//! URL handling module
//!
//! This module provides seed URL parsing, domain extraction and the scope filter
//! that keeps the crawl on the seed's host.

mod domain;
mod seed;

use url::Url;

// Re-export main functions
pub use domain::extract_domain;
pub use seed::parse_seed_url;

/// Returns the link unchanged if it belongs to the target domain
///
/// A link is in scope when its host is exactly `target_domain`. Subdomains,
/// other schemes and ports are not taken into account. Links without a host
/// (`mailto:`, `javascript:`, ...) are never in scope.
///
/// # Examples
///
/// ```
/// use contact_crawler::url::in_scope;
/// use url::Url;
///
/// let link = Url::parse("http://x.test/about").unwrap();
/// assert!(in_scope(link, "x.test").is_some());
///
/// let foreign = Url::parse("http://other.test/").unwrap();
/// assert!(in_scope(foreign, "x.test").is_none());
/// ```
pub fn in_scope(link: Url, target_domain: &str) -> Option<Url> {
    match extract_domain(&link) {
        Some(host) if host == target_domain => Some(link),
        _ => None,
    }
}
