//! Batch orchestration
//!
//! Runs one actor-filmography session per target, strictly one after the
//! other. A target's session reaches its stop page before the next target's
//! first page is requested.

use crate::config::{Config, FailurePolicy};
use crate::models::Actor;
use crate::output::{BatchReport, FailedTarget};
use crate::scrape::fetcher::Fetcher;
use crate::scrape::kinds::ActorMoviesKind;
use crate::scrape::session::PageSession;
use crate::scrape::urls::UrlBuilder;
use crate::state::validate_target_id;
use crate::storage::PersistenceSink;
use crate::{ConfigError, ScrapeError};
use std::path::Path;

/// Loads target ids from a JSON file holding a list of actors
///
/// The file is the artifact a `listactors` crawl produces, so a list crawl
/// can feed a batch directly. Order is preserved.
pub fn load_targets(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BatchFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_targets(&content).map_err(|message| ConfigError::BatchFile {
        path: path.display().to_string(),
        message,
    })
}

/// Parses target ids from a JSON list of actors
pub fn parse_targets(content: &str) -> Result<Vec<String>, String> {
    let actors: Vec<Actor> = serde_json::from_str(content).map_err(|e| e.to_string())?;

    actors
        .iter()
        .enumerate()
        .map(|(i, actor)| {
            validate_target_id(&actor.imdb_id)
                .map(str::to_string)
                .map_err(|_| format!("entry {} ({:?}) has no usable imdb_id", i, actor.name))
        })
        .collect()
}

/// Runs an actor-filmography crawl for every target, in order
///
/// Under `FailurePolicy::Abort` the first failing target ends the batch
/// with its error. Under `FailurePolicy::Continue` the failure is logged
/// and recorded and the next target starts; configuration errors still
/// end the batch because they would fail every target the same way.
pub async fn run_batch<F, S>(
    targets: &[String],
    config: &Config,
    urls: &UrlBuilder,
    fetcher: &F,
    sink: &S,
) -> Result<BatchReport, ScrapeError>
where
    F: Fetcher,
    S: PersistenceSink,
{
    let mut report = BatchReport::default();
    let policy = config.batch.on_failure;

    tracing::info!("Batch of {} targets ({:?} on failure)", targets.len(), policy);

    for (i, target) in targets.iter().enumerate() {
        tracing::info!("Target {}/{}: {}", i + 1, targets.len(), target);

        let result = match PageSession::start(
            target,
            ActorMoviesKind::new(target),
            urls,
            fetcher,
            sink,
            config.output.persist,
        ) {
            Ok(session) => session.run().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(session_report) => report.completed.push(session_report),
            Err(e) if policy == FailurePolicy::Abort || e.is_fatal_for_batch() => {
                tracing::error!("Batch aborted at {}: {}", target, e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Skipping {} after failure: {}", target, e);
                report.failed.push(FailedTarget {
                    target_id: target.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
