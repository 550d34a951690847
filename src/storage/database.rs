//! SQLite-backed snapshot store.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;

use super::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use super::store::{SnapshotStore, StoreError};

/// Snapshot store persisted in a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;

        let store = Self { conn };
        store.initialize()?;

        Ok(store)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA_VERSION_TABLE)?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, StoreError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), StoreError> {
        if from_version < 1 {
            self.conn.execute_batch(SCHEMA)?;

            self.conn.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                [CURRENT_VERSION],
            )?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    /// Keys with stored snapshots, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key FROM snapshots ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    /// Delete a snapshot. Returns `true` if one existed.
    pub fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }
}

impl SnapshotStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::from)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
