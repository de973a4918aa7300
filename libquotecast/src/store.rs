//! Posted-quote history, persisted as a flat JSON array of strings
//!
//! The store is the local exact-match side of duplicate avoidance. A quote
//! is recorded only after a confirmed successful publish and is never
//! removed. The whole set is rewritten on every record; a single process
//! owns the file and no locking is attempted.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

#[derive(Debug)]
pub struct PostedStore {
    path: PathBuf,
    entries: HashSet<String>,
}

impl PostedStore {
    /// Load the store from `path`. A missing file is an empty history, not
    /// an error; an unreadable or malformed file is.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                let list: Vec<String> = serde_json::from_str(&content)?;
                list.into_iter().collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, entries })
    }

    /// Exact-match membership check. Read-only.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains(text)
    }

    /// Add a confirmed-published quote and rewrite the backing file in full.
    ///
    /// The entry stays in the in-memory set even if the write fails, so a
    /// rerun within the same process still refuses to repost it; the caller
    /// decides whether a failed write is worth surfacing.
    pub fn record(&mut self, text: &str) -> Result<(), StoreError> {
        self.entries.insert(text.to_string());
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let list: Vec<&String> = self.entries.iter().collect();
        let json = serde_json::to_string_pretty(&list)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
