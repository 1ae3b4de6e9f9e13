use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::{migrations, KeyValueStore, StoreConfig, StoreError};

/// Key/value pairs in a single SQLite table.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

fn map_sqlite_err(e: rusqlite::Error) -> StoreError {
    StoreError::Internal(e.to_string())
}

impl SqliteStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let path = config.resolved_sqlite_path();
        std::fs::create_dir_all(path.parent().unwrap_or(Path::new(".")))
            .map_err(|e| StoreError::Internal(format!("mkdir: {e}")))?;
        Self::open_path(&path)
    }

    pub fn open_path(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(map_sqlite_err)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;",
        )
        .map_err(map_sqlite_err)?;
        debug!("opened kv store at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        migrations::run(&conn).map_err(map_sqlite_err)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::Internal("lock poisoned".into()))?;
        f(&mut conn)
    }
}

const UPSERT: &str = "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<String, StoreError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(map_sqlite_err)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(UPSERT, params![key, value, Utc::now()])
                .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])
                .map_err(map_sqlite_err)?;
            Ok(())
        })
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
                )
                .map_err(map_sqlite_err)?;
            let keys = stmt
                .query_map(params![prefix], |row| row.get(0))
                .map_err(map_sqlite_err)?
                .collect::<Result<Vec<String>, _>>()
                .map_err(map_sqlite_err)?;
            Ok(keys)
        })
    }

    /// All entries land in one transaction.
    fn set_many(&self, entries: &[(String, String)]) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(map_sqlite_err)?;
            let now = Utc::now();
            for (key, value) in entries {
                tx.execute(UPSERT, params![key, value, now])
                    .map_err(map_sqlite_err)?;
            }
            tx.commit().map_err(map_sqlite_err)
        })
    }
}
