//! Crawler coordinator - the lesson history page loop
//!
//! This module contains the crawl loop that:
//! - Fetches a history page
//! - Extracts its lesson records
//! - Follows the forward pagination link after a fixed pause
//! - Stops when a page has no forward link

use crate::crawler::fetcher::PageSource;
use crate::crawler::pacer::Pacer;
use crate::extract::{parse_page, ExtractOptions};
use crate::record::LessonRecord;
use crate::state::CrawlState;
use crate::HarvestError;
use std::time::Duration;
use url::Url;

/// Drives the page loop over a page source
///
/// The crawler owns its page source and pacer, so tests can swap in an
/// in-memory source and a recording pacer.
pub struct Crawler<S, P> {
    source: S,
    pacer: P,
    options: ExtractOptions,
    interval: Duration,
    state: CrawlState,
    pages_visited: usize,
}

impl<S: PageSource, P: Pacer> Crawler<S, P> {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `source` - Where pages come from
    /// * `pacer` - What waits between pages
    /// * `options` - Extraction settings (time offset, next-link text)
    /// * `interval` - Pause before each follow-up page
    pub fn new(source: S, pacer: P, options: ExtractOptions, interval: Duration) -> Self {
        Self {
            source,
            pacer,
            options,
            interval,
            state: CrawlState::FetchingPage,
            pages_visited: 0,
        }
    }

    /// Current state of the page loop
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Number of pages fetched by the last crawl
    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    /// The page source pages are fetched from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The pacer that waits between pages
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Runs the page loop from `first_page` until a page has no next link
    ///
    /// Records come back in page-visit order, and in document order within a
    /// page. Any fetch or extraction failure aborts the whole crawl; records
    /// gathered from earlier pages are dropped with it.
    pub async fn crawl(&mut self, first_page: Url) -> Result<Vec<LessonRecord>, HarvestError> {
        self.state = CrawlState::FetchingPage;
        self.pages_visited = 0;

        let mut records = Vec::new();
        let mut url = first_page;

        loop {
            tracing::info!("Fetching page {}: {}", self.pages_visited + 1, url);
            let page = self.source.fetch(&url).await?;
            self.pages_visited += 1;

            self.transition(CrawlState::Extracting)?;
            let parsed = parse_page(&page.body, &page.url, &self.options).map_err(|e| {
                tracing::error!("Failed to extract {}: {}", page.url, e);
                e
            })?;
            tracing::debug!("Extracted {} records from {}", parsed.records.len(), page.url);
            records.extend(parsed.records);

            self.transition(CrawlState::Paginating)?;
            match parsed.next_page {
                Some(next) => {
                    self.pacer.pause(self.interval).await;
                    self.transition(CrawlState::FetchingPage)?;
                    url = next;
                }
                None => {
                    self.transition(CrawlState::Done)?;
                    break;
                }
            }
        }

        tracing::info!(
            "Crawl completed: {} records from {} pages",
            records.len(),
            self.pages_visited
        );

        Ok(records)
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), HarvestError> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}
