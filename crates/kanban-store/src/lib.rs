mod memory;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Internal(String),
}

/// A synchronous string key/value store.
///
/// There are no cross-key guarantees unless a backend overrides
/// [`KeyValueStore::set_many`].
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Returns `StoreError::NotFound` if absent.
    fn get(&self, key: &str) -> Result<String, StoreError>;

    /// Write (create or overwrite) a value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. No-op if absent.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// List keys starting with `prefix`, sorted.
    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Read a value, returning `None` if it does not exist.
    fn get_opt(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.get(key) {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_opt(key)?.is_some())
    }

    /// Write several keys. The default writes them one after another.
    fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

// -- Configuration --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite,
}

impl Backend {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "memory" => Some(Backend::Memory),
            "sqlite" => Some(Backend::Sqlite),
            _ => None,
        }
    }
}

/// Configuration for the key/value backend.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: Backend,
    /// SQLite database file. Defaults to `<data dir>/kanban.db`.
    pub sqlite_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Sqlite,
            sqlite_path: None,
        }
    }
}

impl StoreConfig {
    /// Build from `KANBAN_STORE` (`memory` | `sqlite`) and `KANBAN_DB_PATH`.
    pub fn from_env() -> Self {
        Self {
            backend: std::env::var("KANBAN_STORE")
                .ok()
                .and_then(|b| Backend::parse_str(&b))
                .unwrap_or(Backend::Sqlite),
            sqlite_path: std::env::var_os("KANBAN_DB_PATH").map(PathBuf::from),
        }
    }

    pub fn resolved_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| data_dir().join("kanban.db"))
    }
}

/// `$XDG_DATA_HOME/kanban`, falling back to `~/.local/share/kanban`.
pub fn data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("kanban")
}

// -- Factory --

pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    match config.backend {
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
        Backend::Sqlite => {
            #[cfg(feature = "sqlite")]
            {
                Ok(Arc::new(SqliteStore::open(config)?))
            }
            #[cfg(not(feature = "sqlite"))]
            {
                Err(StoreError::Internal(
                    "sqlite backend requested but the 'sqlite' feature is not enabled".into(),
                ))
            }
        }
    }
}
