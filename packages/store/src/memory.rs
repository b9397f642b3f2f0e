use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::LocalStore;

/// In-memory LocalStore for testing and as a no-persistence fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn put(&self, key: &str, value: String) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_remove() {
        let store = MemoryStore::new();

        assert!(store.get("user").await.is_none());

        store.put("user", "{\"email\":\"a@b.c\"}".to_string()).await;
        assert_eq!(
            store.get("user").await.as_deref(),
            Some("{\"email\":\"a@b.c\"}")
        );

        store.remove("user").await;
        assert!(store.get("user").await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.put("accessToken", "abc".to_string()).await;
        assert_eq!(other.get("accessToken").await.as_deref(), Some("abc"));
    }
}
