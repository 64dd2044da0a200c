use crate::config::types::{Config, CrawlerConfig, PortalConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_portal_config(&config.portal)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates portal location and paths
fn validate_portal_config(config: &PortalConfig) -> Result<(), ConfigError> {
    let base = config.base()?;

    if base.scheme() != "https" && base.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url has no host: '{}'",
            config.base_url
        )));
    }

    for (name, path) in [
        ("login-path", &config.login_path),
        ("home-path", &config.home_path),
        ("first-page-path", &config.first_page_path),
    ] {
        validate_path(name, path)?;
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.crawl_interval_ms < 100 || config.crawl_interval_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "crawl-interval-ms must be between 100 and 60000, got {}",
            config.crawl_interval_ms
        )));
    }

    if config.next_link_text.trim().is_empty() {
        return Err(ConfigError::Validation(
            "next-link-text cannot be empty".to_string(),
        ));
    }

    if !(-12..=14).contains(&config.utc_offset_hours) {
        return Err(ConfigError::Validation(format!(
            "utc-offset-hours must be between -12 and 14, got {}",
            config.utc_offset_hours
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if config.name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "user-agent name cannot contain whitespace, got '{}'",
            config.name
        )));
    }

    Ok(())
}

/// Validates an absolute portal path
fn validate_path(name: &str, path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must start with '/', got '{}'",
            name, path
        )));
    }
    Ok(())
}
