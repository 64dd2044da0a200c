//! Crawler module for walking the lesson history
//!
//! This module contains the crawling logic, including:
//! - Logging in to the portal
//! - Fetching pages over HTTP or from memory
//! - The paced page loop that accumulates records

mod coordinator;
mod fetcher;
mod pacer;
mod session;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_page, HttpPageSource, Page, PageSource, StaticPageSource};
pub use pacer::{Pacer, TokioPacer};
pub use session::{login, LoginForm, Session, PASSWORD_FIELD, USERNAME_FIELD};

use crate::config::{Config, Credentials};
use crate::record::LessonRecord;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point. It will:
/// 1. Log in with the given credentials
/// 2. Start at the first lesson history page
/// 3. Follow the forward pagination link, pausing between pages
/// 4. Return every record in page-visit order
///
/// # Arguments
///
/// * `config` - The harvest configuration
/// * `credentials` - Portal login credentials
///
/// # Returns
///
/// * `Ok(Vec<LessonRecord>)` - All records from all pages
/// * `Err(HarvestError)` - Login, fetching or extraction failed
///
/// # Example
///
/// ```no_run
/// use lesson_harvest::config::{load_config_or_default, Credentials};
/// use lesson_harvest::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config_or_default(None)?;
/// let credentials = Credentials::from_env()?;
/// let records = crawl(&config, &credentials).await?;
/// println!("{} lessons", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: &Config,
    credentials: &Credentials,
) -> Result<Vec<LessonRecord>, HarvestError> {
    let first_page = config.portal.first_page_url()?;
    let options = config.crawler.extract_options()?;

    let session = Session::login(config, credentials).await?;
    let mut crawler = Crawler::new(
        session.into_page_source(),
        TokioPacer,
        options,
        config.crawler.crawl_interval(),
    );

    crawler.crawl(first_page).await
}
