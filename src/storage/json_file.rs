//! JSON file sink
//!
//! Writes each artifact to `<root>/<key>.json`. The document is first written
//! to a sibling `.tmp` file and then renamed over the target, so a reader
//! sees either the previous snapshot or the new one, never a partial file.

use crate::storage::traits::{PersistError, PersistResult, PersistenceSink};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence sink backed by JSON files on disk
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    root: PathBuf,
}

impl JsonFileSink {
    /// Creates a sink rooted at `root`; directories are created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file a key is written to
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl PersistenceSink for JsonFileSink {
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> PersistResult<()> {
        let data = serde_json::to_vec(value).map_err(|source| PersistError::Serialization {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        write_replacing(&path, &data).map_err(|source| PersistError::Io {
            path: path.display().to_string(),
            source,
        })?;

        tracing::trace!("Saved {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

fn write_replacing(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, data)?;
    fs::rename(&tmp_path, path)
}
