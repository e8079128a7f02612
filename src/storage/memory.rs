//! In-memory sink
//!
//! Keeps every save as a JSON value, in order, so checkpoint history can
//! be inspected in tests.

use crate::storage::traits::{PersistError, PersistResult, PersistenceSink};
use serde::Serialize;
use serde_json::Value;
use std::sync::Mutex;

/// Persistence sink that records every write
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<(String, Value)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All saves so far, oldest first
    pub fn writes(&self) -> Vec<(String, Value)> {
        self.lock().clone()
    }

    /// Number of saves so far
    pub fn write_count(&self) -> usize {
        self.lock().len()
    }

    /// The most recent value saved under `key`
    pub fn latest(&self, key: &str) -> Option<Value> {
        self.lock()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, Value)>> {
        // A panic while holding the lock can't leave the Vec half-updated
        self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PersistenceSink for MemorySink {
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PersistResult<()> {
        let value = serde_json::to_value(value).map_err(|source| PersistError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.lock().push((key.to_string(), value));
        Ok(())
    }
}
