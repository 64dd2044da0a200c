//! State module for tracking crawl progress
//!
//! The crawl driver moves through a small state machine while it walks the
//! lesson history: fetch a page, extract it, look for the next page, repeat.

mod crawl_state;

pub use crawl_state::CrawlState;
