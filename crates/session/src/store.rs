//! Key-value persistence contract and its backends

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key under which the score history is stored
pub const SCORES_KEY: &str = "zonefall-scores";

/// Minimal string key-value store
pub trait ScoreStore {
    /// Value stored under `key`, or `None` when nothing was written yet
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store (tests, or running without a data directory)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ScoreStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.try_exists().unwrap_or(false) {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(contents))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "zonefall-store-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_memory_store_read_write() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read(SCORES_KEY).unwrap(), None);
        store.write(SCORES_KEY, "[]").unwrap();
        assert_eq!(store.read(SCORES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let store = JsonFileStore::new(temp_dir("missing"));
        assert_eq!(store.read(SCORES_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = temp_dir("create").join("nested");
        let mut store = JsonFileStore::new(&dir);
        store.write(SCORES_KEY, "[1]").unwrap();

        assert!(store.path_for(SCORES_KEY).ends_with("zonefall-scores.json"));
        assert_eq!(store.read(SCORES_KEY).unwrap().as_deref(), Some("[1]"));
        let _ = fs::remove_dir_all(dir);
    }
}
