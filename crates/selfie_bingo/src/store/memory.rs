//! In-memory tile store.

use super::{StoreError, TileStore};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

/// Tile store backed by a mutex-guarded map.
///
/// Used by tests and dry runs; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryTileStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTileStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TileStore for MemoryTileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Writing entry");
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryTileStore::new();
        assert_eq!(store.get("box1name").expect("get"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryTileStore::new();
        store.set("box1name", "Ada").expect("set");
        store.set("box1name", "Bob").expect("set");
        assert_eq!(store.get("box1name").expect("get").as_deref(), Some("Bob"));
        assert_eq!(store.len(), 1);
    }
}
