//! Persistent transition log.
//!
//! Append-only SQLite store for rendered log lines. The schema is a single
//! `logs` table with an autoincrement id; readers get messages back newest
//! first and never see the ids. A `PRAGMA user_version` mismatch on open
//! drops and recreates the table, so a schema bump is a clean slate rather
//! than a migration.
//!
//! The store is unbounded on purpose. Only an explicit `clear_all` ever
//! reduces it.

use anyhow::Result;
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

/// Bump to force a drop-and-recreate of the logs table on next open.
const SCHEMA_VERSION: i32 = 1;

/// Append-only log store
pub struct LogStore {
    conn: Connection,
}

impl LogStore {
    /// Default database file path
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "battrack", "Battrack")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("battery_logs.db"))
    }

    /// Open or create the store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;

        tracing::info!("Opened log store at {:?}", path);
        Ok(store)
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the schema, discarding any table left by another version
    fn init_schema(&self) -> Result<()> {
        let version: i32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version != SCHEMA_VERSION {
            self.conn.execute_batch("DROP TABLE IF EXISTS logs")?;
        }

        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message TEXT NOT NULL
            );
            ",
        )?;
        self.conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }

    /// Append one rendered log line. The row is committed before this
    /// returns.
    pub fn append(&self, message: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO logs (message) VALUES (?)",
            params![message],
        )?;
        Ok(())
    }

    /// All stored lines, newest first
    pub fn read_all_descending(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT message FROM logs ORDER BY id DESC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    /// Delete every stored line. The id counter keeps counting from where
    /// it was.
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM logs", [])?;
        Ok(())
    }
}
