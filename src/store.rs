//! Local persistence for filter and sort state.
//!
//! Each key is one JSON file in the store directory. Stored entries carry
//! the schema hash of the filter they were saved from; an entry whose hash
//! no longer matches the current schema is rejected instead of applied.

use crate::config;
use crate::error::{DeckError, Result};
use crate::filter::FilterSpec;
use crate::sort::SortSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// A persisted filter session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFilter {
    pub filter: FilterSpec,
    pub sort: SortSpec,
    pub page: usize,
    pub hash: i32,
}

/// Directory-backed key-value store for filter sessions and presets.
pub struct FilterStore {
    /// Directory where entries are stored.
    pub store_dir: PathBuf,
}

impl FilterStore {
    /// Open a store, creating the directory if needed.
    ///
    /// If `store_dir` is `None`, the platform data directory is used.
    pub fn new(store_dir: Option<PathBuf>) -> Result<Self> {
        let dir = store_dir.unwrap_or_else(config::default_store_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { store_dir: dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DeckError::InvalidArgument(format!(
                "store key '{key}' may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(self.store_dir.join(format!("{key}.json")))
    }

    /// Save a filter session under `key`, replacing any previous entry.
    pub fn save(&self, key: &str, filter: &FilterSpec, sort: &SortSpec, page: usize) -> Result<()> {
        let path = self.path_for(key)?;
        let entry = StoredFilter {
            filter: filter.clone(),
            sort: sort.clone(),
            page,
            hash: filter.schema_hash(),
        };
        let mut tmp = NamedTempFile::new_in(&self.store_dir)?;
        serde_json::to_writer(&mut tmp, &entry)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| DeckError::Io(e.error))?;
        tracing::info!(key, hash = entry.hash, "saved filter");
        Ok(())
    }

    /// Load the entry under `key` if its schema still matches `current`.
    ///
    /// Returns `Ok(None)` when nothing usable is stored. A corrupt entry is
    /// removed. A mismatched schema hash is reported as
    /// [`DeckError::StaleFilter`] and the entry is left in place.
    pub fn load(&self, key: &str, current: &FilterSpec) -> Result<Option<StoredFilter>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let entry: StoredFilter = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt stored filter, removing");
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!(key, error = %e, "could not remove corrupt stored filter");
                }
                return Ok(None);
            }
        };
        let current_hash = current.schema_hash();
        if entry.hash != current_hash {
            tracing::warn!(key, stored = entry.hash, current = current_hash, "stored filter is stale");
            return Err(DeckError::StaleFilter {
                key: key.to_string(),
                stored: entry.hash,
                current: current_hash,
            });
        }
        Ok(Some(entry))
    }

    /// Delete the entry under `key`. Returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.store_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Remove every stored entry.
    pub fn clear(&self) -> Result<()> {
        for key in self.keys()? {
            self.remove(&key)?;
        }
        Ok(())
    }
}
