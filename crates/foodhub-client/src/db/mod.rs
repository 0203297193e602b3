//! Durable string key-value storage for client state.
//!
//! Mirrors the browser's local storage: independent string entries with no
//! transactional grouping between keys.

mod migrations;

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;

use crate::error::{ClientError, ClientResult};

pub type DbPool = Pool<SqliteConnectionManager>;

/// A key-value store holding string entries.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove_item(&self, key: &str) -> ClientResult<()>;
}

pub fn create_pool(sqlite_path: &str) -> ClientResult<DbPool> {
    if let Some(parent) = Path::new(sqlite_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(sqlite_path)
        .with_flags(
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )
        .with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA busy_timeout = 5000;",
            )
        });

    let pool = Pool::builder().max_size(4).build(manager)?;

    let conn = pool.get()?;
    migrations::run(&conn)?;

    Ok(pool)
}

/// Local storage persisted in a SQLite file.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(sqlite_path: &str) -> ClientResult<Self> {
        let pool = create_pool(sqlite_path)?;
        tracing::debug!("Local storage opened at {sqlite_path}");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl KeyValueStore for SqliteStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        let conn = self.pool.get()?;
        let result = conn.query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(ClientError::Storage(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM local_storage WHERE key = ?1", rusqlite::params![key])?;
        Ok(())
    }
}

/// Process-local store, used in tests and as a throwaway profile.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}
