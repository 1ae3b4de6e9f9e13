pub mod keys;
mod migrations;
pub mod queries;

pub use migrations::migrate_settings;

use std::sync::Arc;

use kanban_store::{KeyValueStore, MemoryStore, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt document at '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Typed access to the board collections kept in a [`KeyValueStore`].
///
/// Every mutation reads the whole collection, changes it and writes it
/// back. Nothing is cached between calls.
#[derive(Clone)]
pub struct Db {
    kv: Arc<dyn KeyValueStore>,
}

impl Db {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn open_in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn kv(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    pub(crate) fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DbError> {
        match self.kv.get_opt(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| DbError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub(crate) fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DbError> {
        let raw = to_json(key, value)?;
        debug!(key, bytes = raw.len(), "write");
        self.kv.set(key, &raw)?;
        Ok(())
    }
}

pub(crate) fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|source| DbError::Corrupt {
        key: key.to_string(),
        source,
    })
}
