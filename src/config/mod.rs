//! Configuration module for the contact crawler
//!
//! Every setting has a default, so a config file is optional. When one is given
//! it is loaded from TOML and validated before the crawl starts.
//!
//! # Example
//!
//! ```no_run
//! use contact_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractorConfig, OutputConfig, UserAgentConfig, DEFAULT_NAME_SELECTOR,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
