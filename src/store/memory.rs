use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::StateStore;

/// In-process store for tests and for hosts without durable storage.
///
/// Clones share the same map, so a test can hold one clone, hand another to
/// a persister, and observe every write. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents, mostly useful in assertions.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.lock().clone()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.set("audioSrc", "/music/one.mp3");

        assert_eq!(observer.get("audioSrc").as_deref(), Some("/music/one.mp3"));
        assert_eq!(observer.snapshot().len(), 1);
    }

    #[test]
    fn test_overwrites_existing_value() {
        let mut store = MemoryStore::new();

        store.set("audioCurrentTime", "1.5");
        store.set("audioCurrentTime", "2.5");

        assert_eq!(store.get("audioCurrentTime").as_deref(), Some("2.5"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get("audioWasPlaying"), None);
    }
}
