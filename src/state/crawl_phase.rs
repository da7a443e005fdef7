//! Crawl lifecycle definitions
//!
//! The coordinator starts in `Running`, moves to `Flushing` once it stops taking
//! new work, and ends in `Done` after the single flush.

use crate::CrawlError;
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Dequeuing and processing pages
    Running,

    /// Writing the collected records; no more pages will be processed
    Flushing,

    /// Terminal: the flush has been attempted
    Done,
}

impl CrawlPhase {
    /// Returns true if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the transition from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Flushing) | (Self::Flushing, Self::Done)
        )
    }

    /// Performs a checked transition
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlPhase)` - The new phase
    /// * `Err(CrawlError::InvalidTransition)` - The transition is not allowed
    pub fn transition(self, next: CrawlPhase) -> Result<CrawlPhase, CrawlError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CrawlError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Flushing => "flushing",
            Self::Done => "done",
        };
        write!(f, "{}", s)
    }
}

/// Why the main loop left the `Running` phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// Every discovered in-scope URL has been processed
    FrontierExhausted,

    /// The visited-page ceiling was reached
    PageLimit,

    /// An interrupt signal was received
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::PageLimit => "page limit reached",
            Self::Interrupted => "interrupted",
        };
        write!(f, "{}", s)
    }
}
