use crate::extract::{ExtractOptions, NEXT_PAGE_GLYPH};
use crate::output::OutputFormat;
use crate::{ConfigError, ConfigResult};
use chrono::FixedOffset;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Main configuration structure for Lesson-Harvest
///
/// Every section is optional in the settings file; missing values fall back
/// to the portal defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub portal: PortalConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Where the portal lives and which paths matter
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Scheme and host of the portal
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the page holding the login form
    #[serde(rename = "login-path")]
    pub login_path: String,

    /// Path a successful login lands on
    #[serde(rename = "home-path")]
    pub home_path: String,

    /// Path of the first lesson history page
    #[serde(rename = "first-page-path")]
    pub first_page_path: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://my.gaba.jp".to_string(),
            login_path: "/auth/login".to_string(),
            home_path: "/home".to_string(),
            first_page_path: "/lesson/lessonrecords/page/1".to_string(),
        }
    }
}

impl PortalConfig {
    /// Parses the base URL
    pub fn base(&self) -> ConfigResult<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))
    }

    /// Resolves a portal path against the base URL
    pub fn url_for(&self, path: &str) -> ConfigResult<Url> {
        self.base()?
            .join(path)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid path '{}': {}", path, e)))
    }

    pub fn login_url(&self) -> ConfigResult<Url> {
        self.url_for(&self.login_path)
    }

    pub fn first_page_url(&self) -> ConfigResult<Url> {
        self.url_for(&self.first_page_path)
    }
}

/// Crawl loop behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause between consecutive page fetches (milliseconds)
    #[serde(rename = "crawl-interval-ms")]
    pub crawl_interval_ms: u64,

    /// Visible text of the forward pagination link
    #[serde(rename = "next-link-text")]
    pub next_link_text: String,

    /// UTC offset of lesson times shown on the portal
    #[serde(rename = "utc-offset-hours")]
    pub utc_offset_hours: i32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            crawl_interval_ms: 1000,
            next_link_text: NEXT_PAGE_GLYPH.to_string(),
            utc_offset_hours: 9,
        }
    }
}

impl CrawlerConfig {
    pub fn crawl_interval(&self) -> Duration {
        Duration::from_millis(self.crawl_interval_ms)
    }

    /// Builds the per-page extraction settings
    pub fn extract_options(&self) -> ConfigResult<ExtractOptions> {
        let utc_offset = FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            ConfigError::Validation(format!(
                "utc-offset-hours out of range: {}",
                self.utc_offset_hours
            ))
        })?;

        Ok(ExtractOptions {
            utc_offset,
            next_link_text: self.next_link_text.clone(),
        })
    }
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}
