//! Storage traits and error types
//!
//! This module defines the trait interface for persistence sinks and
//! associated error types.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while writing an artifact
///
/// These are never fatal to a crawl: the session logs them and keeps
/// accumulating, so a later successful write still captures everything.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Serialization error for {key}: {source}")]
    Serialization {
        key: String,
        source: serde_json::Error,
    },

    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Trait for artifact sinks
///
/// A sink stores one JSON document per key. Each `save` replaces the whole
/// document; there is no append or patch format.
pub trait PersistenceSink {
    /// Serializes `value` and stores it under `key`, replacing any previous value
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PersistResult<()>;
}
