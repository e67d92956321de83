use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::ForecastRecord;
use crate::utils::constants::WEATHER_TABLE;

/// SQLite sink. Every write replaces the previous batch in full.
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        debug!(path = %path.display(), "opened forecast store");
        Ok(Self { conn })
    }

    /// Open an existing database for reading. `None` when nothing is there;
    /// no file or directory is created.
    pub fn open_existing(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened existing forecast store");
        Ok(Some(Self { conn }))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Drop and recreate the table, then insert the batch, in one transaction.
    /// A failed write leaves the previous batch in place.
    pub fn replace_all(&mut self, records: &[ForecastRecord]) -> Result<usize> {
        let updated_at = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 location TEXT,
                 min_temp TEXT,
                 max_temp TEXT,
                 description TEXT,
                 updated_at TEXT NOT NULL
             );",
            table = WEATHER_TABLE
        ))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (location, min_temp, max_temp, description, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                WEATHER_TABLE
            ))?;
            for record in records {
                stmt.execute(params![
                    record.location,
                    record.min_temp,
                    record.max_temp,
                    record.description,
                    updated_at
                ])?;
            }
        }

        tx.commit()?;
        info!(records = records.len(), "forecast store replaced");
        Ok(records.len())
    }

    /// Stored records in insertion order. Empty when nothing was ever written.
    pub fn load_all(&self) -> Result<Vec<ForecastRecord>> {
        if !self.table_exists()? {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT location, min_temp, max_temp, description FROM {} ORDER BY id",
            WEATHER_TABLE
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(ForecastRecord::new(
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<usize> {
        if !self.table_exists()? {
            return Ok(0);
        }
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", WEATHER_TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// RFC 3339 timestamp of the stored batch.
    pub fn last_updated(&self) -> Result<Option<String>> {
        if !self.table_exists()? {
            return Ok(None);
        }
        let updated_at = self
            .conn
            .query_row(
                &format!("SELECT MAX(updated_at) FROM {}", WEATHER_TABLE),
                [],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();
        Ok(updated_at)
    }

    fn table_exists(&self) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![WEATHER_TABLE],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}
