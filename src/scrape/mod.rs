//! Scrape module for paginated record extraction
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a fixed language preference
//! - Page parsing and per-record field extraction
//! - Stop detection per crawl kind
//! - The page session loop and batch orchestration

mod batch;
mod extract;
mod fetcher;
mod kinds;
mod page;
mod session;
mod stop;
mod urls;

pub use batch::{load_targets, parse_targets, run_batch};
pub use extract::{
    extract_actor, extract_movie, extract_movie_checked, parse_rating, parse_year,
    FieldParseError,
};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use kinds::{ActorMoviesKind, CrawlKind, ListActorsKind};
pub use page::{attr, child_text, text_of, Page};
pub use session::{PageOutcome, PageSession};
pub use stop::{is_exhausted, sentinel_present, StopPolicy, NO_RESULTS_MESSAGE};
pub use urls::UrlBuilder;

use crate::config::Config;
use crate::output::{BatchReport, SessionReport};
use crate::storage::{JsonFileSink, PersistenceSink};
use crate::{ConfigError, ScrapeError};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which records a run collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrapeKind {
    /// One actor's filmography
    ActorMovies,

    /// Filmographies for every actor in a batch file
    ManyActorMovies,

    /// The actors on a user list
    ListActors,
}

impl ScrapeKind {
    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActorMovies => "actormovies",
            Self::ManyActorMovies => "manyactormovies",
            Self::ListActors => "listactors",
        }
    }

    /// Name used for artifact directories and file prefixes
    ///
    /// Batch runs write the same artifacts as single-actor runs.
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Self::ActorMovies | Self::ManyActorMovies => "actormovies",
            Self::ListActors => "listactors",
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::ManyActorMovies)
    }
}

impl fmt::Display for ScrapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScrapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "actormovies" => Ok(Self::ActorMovies),
            "manyactormovies" => Ok(Self::ManyActorMovies),
            "listactors" => Ok(Self::ListActors),
            other => Err(format!(
                "unknown scrape kind '{}' (expected actormovies, manyactormovies or listactors)",
                other
            )),
        }
    }
}

/// A validated description of what to scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeRequest {
    /// One target of a single-target kind
    Single { kind: ScrapeKind, target_id: String },

    /// Every actor listed in a batch file
    Batch { file: PathBuf },
}

impl ScrapeRequest {
    /// Builds a request from command-line style arguments
    ///
    /// Batch runs need a file; every other kind needs an id.
    pub fn new(
        kind: ScrapeKind,
        id: Option<&str>,
        file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if kind.is_batch() {
            let file = file.ok_or_else(|| {
                ConfigError::MissingArgument(
                    "-f, which should be a file containing a JSON list of actors".to_string(),
                )
            })?;
            return Ok(Self::Batch { file });
        }

        let id = id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingArgument("--id".to_string()))?;

        Ok(Self::Single {
            kind,
            target_id: id.trim().to_string(),
        })
    }
}

/// Result of a run
#[derive(Debug, Clone)]
pub enum RunSummary {
    Single(SessionReport),
    Batch(BatchReport),
}

/// Runs a request against the live site, writing JSON files under the
/// configured output directory
pub async fn run(config: &Config, request: &ScrapeRequest) -> Result<RunSummary, ScrapeError> {
    let fetcher = HttpFetcher::new(config)?;
    let sink = JsonFileSink::new(&config.output.directory);
    run_with(config, request, &fetcher, &sink).await
}

/// Runs a request with the given fetcher and sink
pub async fn run_with<F, S>(
    config: &Config,
    request: &ScrapeRequest,
    fetcher: &F,
    sink: &S,
) -> Result<RunSummary, ScrapeError>
where
    F: Fetcher,
    S: PersistenceSink,
{
    let urls = UrlBuilder::from_config(config)?;
    let persist = config.output.persist;

    match request {
        ScrapeRequest::Single {
            kind: ScrapeKind::ListActors,
            target_id,
        } => {
            let session = PageSession::start(
                target_id,
                ListActorsKind::new(),
                &urls,
                fetcher,
                sink,
                persist,
            )?;
            Ok(RunSummary::Single(session.run().await?))
        }
        ScrapeRequest::Single { target_id, .. } => {
            let session = PageSession::start(
                target_id,
                ActorMoviesKind::new(target_id),
                &urls,
                fetcher,
                sink,
                persist,
            )?;
            Ok(RunSummary::Single(session.run().await?))
        }
        ScrapeRequest::Batch { file } => {
            let targets = load_targets(file)?;
            let report = run_batch(&targets, config, &urls, fetcher, sink).await?;
            Ok(RunSummary::Batch(report))
        }
    }
}
