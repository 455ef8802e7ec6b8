//! Persistent key-value store for jotter.
//!
//! Values are stored as JSON text in a single `SQLite` table. Reads never
//! fail: a missing, malformed, or unreadable value yields the caller's
//! default. Writes are synchronous upserts.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

const MEMORY_PATH: &str = ":memory:";

/// Key-value store backed by `SQLite`.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Store opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(MEMORY_PATH),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`, or `default` when it is absent or
    /// cannot be decoded.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.read_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Failed to read key '{}', using default: {}", key, e);
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed value under key '{}', using default: {}", key, e);
                default
            }
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.write_raw(key, &json)
    }

    /// Get the raw JSON text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn read_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Store raw text under `key` without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn write_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        debug!("Wrote {} bytes under key '{}'", value.len(), key);
        Ok(())
    }

    /// List all stored keys in lexical order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let total_keys: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;

        let last: Option<String> = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM kv", [], |row| row.get(0))?;

        let last_write = last
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            total_keys,
            last_write,
            db_size_bytes,
        })
    }

    /// Refuse every write on this connection until switched back.
    #[cfg(test)]
    pub(crate) fn set_read_only(&self, read_only: bool) -> Result<()> {
        self.conn.pragma_update(None, "query_only", read_only)?;
        Ok(())
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of keys stored.
    pub total_keys: i64,
    /// Time of the most recent write.
    pub last_write: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    fn create_test_store() -> Store {
        Store::open_in_memory().expect("failed to create test store")
    }

    #[test]
    fn test_read_missing_returns_default() {
        let store = create_test_store();
        let value: Vec<String> = store.read("missing", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_write_then_read() {
        let store = create_test_store();
        let records = vec![
            Record {
                name: "a".to_string(),
                count: 1,
            },
            Record {
                name: "b".to_string(),
                count: 2,
            },
        ];

        store.write("records", &records).unwrap();
        let loaded: Vec<Record> = store.read("records", Vec::new());
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_write_overwrites() {
        let store = create_test_store();
        store.write("theme", "light").unwrap();
        store.write("theme", "dark").unwrap();

        assert_eq!(store.read("theme", String::new()), "dark");
        assert_eq!(store.keys().unwrap(), vec!["theme".to_string()]);
    }

    #[test]
    fn test_malformed_value_returns_default() {
        let store = create_test_store();
        store.write_raw("records", "{not json").unwrap();

        let loaded: Vec<Record> = store.read("records", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_wrong_shape_returns_default() {
        let store = create_test_store();
        store.write("records", &42).unwrap();

        let loaded: Vec<Record> = store.read("records", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_read_raw_is_json() {
        let store = create_test_store();
        store.write("theme", "dark").unwrap();

        assert_eq!(store.read_raw("theme").unwrap().as_deref(), Some("\"dark\""));
        assert!(store.read_raw("nothing").unwrap().is_none());
    }

    #[test]
    fn test_keys_sorted() {
        let store = create_test_store();
        store.write("theme", "dark").unwrap();
        store.write("notes", &Vec::<Record>::new()).unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["notes".to_string(), "theme".to_string()]
        );
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let store = create_test_store();
        store.write("theme", "dark").unwrap();
        store.set_read_only(true).unwrap();

        assert!(store.write("theme", "light").is_err());
        assert_eq!(store.read("theme", String::new()), "dark");

        store.set_read_only(false).unwrap();
        store.write("theme", "light").unwrap();
        assert_eq!(store.read("theme", String::new()), "light");
    }

    #[test]
    fn test_stats_empty() {
        let store = create_test_store();
        let stats = store.stats().unwrap();

        assert_eq!(stats.total_keys, 0);
        assert!(stats.last_write.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let store = create_test_store();
        store.write("a", &1).unwrap();
        store.write("b", &2).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_keys, 2);
        assert!(stats.last_write.is_some());
    }

    #[test]
    fn test_path_in_memory() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_unicode_value() {
        let store = create_test_store();
        store.write("greeting", "Hello 世界 🌍").unwrap();
        assert_eq!(store.read("greeting", String::new()), "Hello 世界 🌍");
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("notes.db");

        {
            let store = Store::open(&db_path).unwrap();
            store.write("theme", "light").unwrap();
            assert_eq!(store.path(), db_path);
        }

        assert!(db_path.exists());
        let store = Store::open(&db_path).unwrap();
        assert_eq!(store.read("theme", String::new()), "light");
        assert!(store.stats().unwrap().db_size_bytes > 0);
    }
}
