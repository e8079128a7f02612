//! Storage module for persisting crawl results
//!
//! This module handles writing accumulated records out as JSON artifacts:
//! - The `PersistenceSink` trait every sink implements
//! - `JsonFileSink`, which writes one file per target with an atomic rename
//! - `MemorySink`, which keeps writes in memory
//! - Artifact key derivation

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileSink;
pub use memory::MemorySink;
pub use traits::{PersistError, PersistResult, PersistenceSink};

use crate::scrape::ScrapeKind;

/// Derives the artifact key for one target
///
/// Keys are `<kind>/<kind>-<target>`, so every target of every kind gets
/// its own artifact and sessions never write over each other.
///
/// # Example
///
/// ```
/// use reel_harvest::scrape::ScrapeKind;
/// use reel_harvest::storage::artifact_key;
///
/// assert_eq!(
///     artifact_key(ScrapeKind::ActorMovies, "nm0000199"),
///     "actormovies/actormovies-nm0000199"
/// );
/// ```
pub fn artifact_key(kind: ScrapeKind, target_id: &str) -> String {
    let name = kind.artifact_name();
    format!("{}/{}-{}", name, name, target_id)
}
