//! Reel-Harvest: an incremental, paginated filmography scraper
//!
//! This crate walks paginated listing pages one at a time, pulls movie or
//! actor records out of each page, and checkpoints the accumulated results
//! to a JSON artifact after every record so an interrupted crawl loses at
//! most the record in flight.

pub mod config;
pub mod models;
pub mod output;
pub mod scrape;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Reel-Harvest operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("URL outside allowed domains: {url}")]
    DisallowedDomain { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Can't find actor name for {target} in header {header:?}")]
    ActorName { target: String, header: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::SessionState,
        to: state::SessionState,
    },
}

impl ScrapeError {
    /// Returns true if the error must end a batch no matter the failure policy
    ///
    /// Configuration problems affect every target equally, so continuing
    /// with the next one would only repeat the failure.
    pub fn is_fatal_for_batch(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid target id {0:?}")]
    InvalidTarget(String),

    #[error("Failed to load batch file {path}: {message}")]
    BatchFile { path: String, message: String },
}

// Re-export commonly used types
pub use config::Config;
pub use models::{Actor, ActorMovies, Movie};
pub use state::{ScrapeSession, SessionState};
