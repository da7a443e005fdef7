//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the controller's lifecycle (running, flushing, done)
//! - `StopReason`: why the main loop stopped accepting new work

mod crawl_phase;

// Re-export main types
pub use crawl_phase::{CrawlPhase, StopReason};
