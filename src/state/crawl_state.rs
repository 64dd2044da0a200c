/// Crawl state definitions for the pagination loop
///
/// This module defines the states of the crawl driver and which moves between
/// them are legal.
use std::fmt;

/// Represents where the crawl driver is in its page loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Waiting for a page body
    FetchingPage,

    /// Turning the page body into records
    Extracting,

    /// Looking for the next-page link
    Paginating,

    /// No next-page link; the accumulated records are final
    Done,
}

impl CrawlState {
    /// Returns true if the driver has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    ///
    /// FetchingPage -> Extracting -> Paginating -> (FetchingPage | Done)
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::FetchingPage, Self::Extracting)
                | (Self::Extracting, Self::Paginating)
                | (Self::Paginating, Self::FetchingPage)
                | (Self::Paginating, Self::Done)
        )
    }

    /// Returns a short lowercase name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchingPage => "fetching_page",
            Self::Extracting => "extracting",
            Self::Paginating => "paginating",
            Self::Done => "done",
        }
    }

    /// Returns all possible crawl states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::FetchingPage,
            Self::Extracting,
            Self::Paginating,
            Self::Done,
        ]
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
