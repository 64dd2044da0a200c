//! Configuration module for Lesson-Harvest
//!
//! This module handles the optional TOML settings file, its validation, and the
//! login credentials read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use lesson_harvest::config::{load_config_or_default, Credentials};
//!
//! let config = load_config_or_default(None).unwrap();
//! let credentials = Credentials::from_env().unwrap();
//! println!("Logging in to {} as {}", config.portal.base_url, credentials.id);
//! ```

mod credentials;
mod parser;
mod types;
mod validation;

// Re-export types
pub use credentials::{Credentials, ID_ENV, PASSWORD_ENV};
pub use types::{Config, CrawlerConfig, OutputConfig, PortalConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
