//! Persisted session storage.
//!
//! The session survives restarts as exactly two string entries: the opaque
//! bearer token and the JSON-serialized user record. `SessionStore`
//! abstracts the storage area so tests can run against an in-memory map
//! while the real client writes files under the state directory.
//!
//! Storage failures are deliberately quiet: a session that cannot be read
//! or written is indistinguishable from "never logged in".

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};

/// Entry name for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Entry name for the serialized user record.
pub const USER_KEY: &str = "user";

pub trait SessionStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// File-per-entry store rooted in the application state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!(error = %e, "could not create session directory");
            return;
        }
        if let Err(e) = std::fs::write(self.entry_path(key), value) {
            warn!(key, error = %e, "could not persist session entry");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.entry_path(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                debug!(key, error = %e, "could not remove session entry");
            }
        }
    }
}

/// In-memory store for tests.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().expect("store lock poisoned").remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("wardbook-test-{}-{}-{}", label, std::process::id(), nanos))
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = scratch_dir("round-trip");
        let store = FileStore::new(dir.clone());

        assert_eq!(store.read(TOKEN_KEY), None);
        store.write(TOKEN_KEY, "tok-abc");
        assert_eq!(store.read(TOKEN_KEY).as_deref(), Some("tok-abc"));

        store.remove(TOKEN_KEY);
        assert_eq!(store.read(TOKEN_KEY), None);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_file_store_remove_when_absent_is_quiet() {
        let store = FileStore::new(scratch_dir("remove-absent"));
        store.remove(USER_KEY);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        store.write(USER_KEY, "{}");
        assert_eq!(store.read(USER_KEY).as_deref(), Some("{}"));
        store.remove(USER_KEY);
        assert_eq!(store.read(USER_KEY), None);
    }
}
