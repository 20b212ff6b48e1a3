use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::StateStore;
use crate::errors::StoreError;

/// File name of the default store: one JSON object of string keys/values.
const STORE_FILE: &str = "playback_state.json";

/// Write-through file-backed store.
///
/// Every `set` rewrites the JSON file, so the newest state survives however
/// abruptly the host goes away. Reads are served from memory.
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any previously persisted entries.
    ///
    /// A missing file is an empty store; an unreadable or corrupt file is an
    /// error so the host can decide what to do about it.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries: HashMap<String, String> = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Open the store at its default location under the user's config dir.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::load(default_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Default store location: `<config dir>/playmark/playback_state.json`.
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("playmark")
        .join(STORE_FILE)
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());

        // Keep the in-memory value even when the write fails; the next
        // successful flush persists the newest state.
        if let Err(e) = self.flush() {
            log::warn!(
                "[JsonFileStore] failed to persist {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        let store = JsonFileStore::load(&path).unwrap();

        assert_eq!(store.path(), path);
        assert_eq!(store.get("audioSrc"), None);
    }

    #[test]
    fn test_values_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::load(&path).unwrap();
        store.set("audioSrc", "/music/one.mp3");
        store.set("audioCurrentTime", "42.5");
        drop(store);

        let reloaded = JsonFileStore::load(&path).unwrap();
        assert_eq!(reloaded.get("audioSrc").as_deref(), Some("/music/one.mp3"));
        assert_eq!(reloaded.get("audioCurrentTime").as_deref(), Some("42.5"));
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.json");

        let mut store = JsonFileStore::load(&path).unwrap();
        store.set("audioWasPlaying", "true");

        let reloaded = JsonFileStore::load(&path).unwrap();
        assert_eq!(reloaded.get("audioWasPlaying").as_deref(), Some("true"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "definitely not json").unwrap();

        let result = JsonFileStore::load(&path);
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_overwrite_wins_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut store = JsonFileStore::load(&path).unwrap();
        store.set("audioCurrentTime", "10");
        store.set("audioCurrentTime", "20.25");
        drop(store);

        let reloaded = JsonFileStore::load(&path).unwrap();
        assert_eq!(reloaded.get("audioCurrentTime").as_deref(), Some("20.25"));
    }
}
