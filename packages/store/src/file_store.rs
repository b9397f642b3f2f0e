//! # Filesystem-backed local store
//!
//! [`FileStore`] is a [`LocalStore`] implementation that persists each
//! well-known key as one JSON file under a base directory. It is used on
//! desktop builds to retain the session and guest slip across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── user.json
//! ├── accessToken.json
//! ├── localBetSlip.json
//! └── offlineBookedBets.json
//! ```
//!
//! Missing or unreadable files read as `None`; writes are best-effort. A
//! corrupted directory degrades to "no local data" rather than crashing.

use std::path::PathBuf;

use crate::storage::LocalStore;

/// Filesystem-backed LocalStore, one file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl LocalStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    async fn put(&self, key: &str, value: String) {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = std::fs::write(path, value);
    }

    async fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.key_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("betslip_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.put("localBetSlip", "[]".to_string()).await;

        // Re-open from the same directory
        let store2 = FileStore::new(dir.clone());
        assert_eq!(store2.get("localBetSlip").await.as_deref(), Some("[]"));

        store2.remove("localBetSlip").await;
        assert!(store2.get("localBetSlip").await.is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }
}
