//! Fixture store
//!
//! Canned JSON response bodies, read once from the fixture directory at
//! startup and keyed by file stem (`responses/users.detail.json` is
//! `users.detail`). The store is immutable after loading.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Default, Clone)]
pub struct FixtureStore {
    documents: HashMap<String, Value>,
}

impl FixtureStore {
    /// Load every `*.json` file directly inside `dir`
    ///
    /// Subdirectories and files with other extensions are skipped. A file
    /// that is not valid JSON fails the whole load.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| Error::FixtureDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut documents = HashMap::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = fs::read_to_string(&path).map_err(|source| Error::FixtureRead {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&raw).map_err(|source| Error::FixtureParse {
                path: path.clone(),
                source,
            })?;
            documents.insert(name.to_string(), value);
        }

        Ok(Self { documents })
    }

    /// Build a store from in-memory documents
    #[cfg(test)]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self {
            documents: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.documents.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Fixture names in sorted order
    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
