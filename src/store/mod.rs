//! Key-value persistence backends.
//!
//! The contract is deliberately string-only get/set, modeled on
//! origin-scoped web storage: whatever encoding the values carry is the
//! caller's business, and writes are best effort.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use parking_lot::Mutex;

/// Persistent key-value storage surviving host restarts.
pub trait StateStore {
    /// Read a value by key. `None` if the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value under `key`, overwriting any previous value.
    ///
    /// Best effort: backends that can fail (quota, I/O) log the failure and
    /// keep going rather than surfacing it to the writer.
    fn set(&mut self, key: &str, value: &str);
}

/// A store handle that a host and a persister can share.
pub type SharedStore<S> = Arc<Mutex<S>>;

/// Any store works behind `Arc<Mutex<_>>`, so the host can keep a clone and
/// read back what a persister wrote.
impl<S: StateStore> StateStore for Arc<Mutex<S>> {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.lock().set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct PlainStore(HashMap<String, String>);

    impl StateStore for PlainStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn test_shared_handle_observes_writes() {
        let shared: SharedStore<PlainStore> = Arc::new(Mutex::new(PlainStore::default()));
        let mut writer = shared.clone();

        writer.set("audioSrc", "/music/one.mp3");

        assert_eq!(shared.get("audioSrc").as_deref(), Some("/music/one.mp3"));
        assert_eq!(shared.get("audioCurrentTime"), None);
    }
}
