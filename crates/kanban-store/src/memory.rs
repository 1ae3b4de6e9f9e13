use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{KeyValueStore, StoreError};

/// In-process store. Contents are lost when the value is dropped.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> T,
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Internal("lock poisoned".into()))?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<String, StoreError> {
        self.with_entries(|e| e.get(key).cloned())?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_entries(|e| {
            e.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_entries(|e| {
            e.remove(key);
        })
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.with_entries(|e| {
            e.keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect()
        })
    }

    fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
        // One lock acquisition, so no reader sees half the batch.
        self.with_entries(|e| {
            for (key, value) in entries {
                e.insert(key.clone(), value.clone());
            }
        })
    }
}
