//! `DatabaseManager` — connection ownership and read/write routing.
//!
//! One mutex-guarded write connection; file-backed databases get a dedicated
//! read connection so listings don't queue behind writes, in-memory
//! databases route reads through the writer (separate in-memory connections
//! would not share data). All coordination beyond this is delegated to
//! SQLite's own transaction guarantees.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use lapak_core::config::StorageConfig;
use lapak_core::errors::StorageError;
use lapak_core::{LapakError, LapakResult};

use crate::migrations;

pub struct DatabaseManager {
    writer: Mutex<Connection>,
    reader: Option<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database, apply pragmas, and run migrations.
    pub fn open(path: &Path, config: &StorageConfig) -> LapakResult<Self> {
        let writer = Connection::open(path).map_err(|e| StorageError::Connection {
            message: format!("open {}: {e}", path.display()),
        })?;
        apply_pragmas(&writer, config, false)?;
        migrations::run_migrations(&writer)?;

        let reader = Connection::open(path).map_err(|e| StorageError::Connection {
            message: format!("open reader {}: {e}", path.display()),
        })?;
        apply_pragmas(&reader, config, true)?;

        Ok(Self {
            writer: Mutex::new(writer),
            reader: Some(Mutex::new(reader)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing). Reads share the writer.
    pub fn open_in_memory() -> LapakResult<Self> {
        let config = StorageConfig::default();
        let writer = Connection::open_in_memory().map_err(|e| StorageError::Connection {
            message: format!("open in-memory: {e}"),
        })?;
        apply_pragmas(&writer, &config, false)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            reader: None,
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a closure against the write connection.
    pub fn with_writer<F, T>(&self, f: F) -> LapakResult<T>
    where
        F: FnOnce(&Connection) -> LapakResult<T>,
    {
        let conn = self.writer.lock().map_err(|_| StorageError::Connection {
            message: "write connection mutex poisoned".to_string(),
        })?;
        f(&conn)
    }

    /// Run a closure against the read connection (the writer when in-memory).
    pub fn with_reader<F, T>(&self, f: F) -> LapakResult<T>
    where
        F: FnOnce(&Connection) -> LapakResult<T>,
    {
        match &self.reader {
            Some(reader) => {
                let conn = reader.lock().map_err(|_| StorageError::Connection {
                    message: "read connection mutex poisoned".to_string(),
                })?;
                f(&conn)
            }
            None => self.with_writer(f),
        }
    }

    /// WAL checkpoint on the write connection.
    pub fn checkpoint(&self) -> LapakResult<()> {
        self.with_writer(|conn| {
            // wal_checkpoint reports its progress as a row; discard it.
            conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_row| Ok(()))
                .map_err(|e| {
                    StorageError::Sqlite {
                        message: format!("wal_checkpoint: {e}"),
                    }
                    .into()
                })
        })
    }
}

fn apply_pragmas(
    conn: &Connection,
    config: &StorageConfig,
    read_only: bool,
) -> LapakResult<()> {
    let pragma_err = |e: rusqlite::Error| {
        LapakError::from(StorageError::Connection {
            message: format!("apply pragmas: {e}"),
        })
    };

    let journal = if config.wal { "WAL" } else { "DELETE" };
    conn.pragma_update(None, "journal_mode", journal)
        .map_err(pragma_err)?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(pragma_err)?;
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(pragma_err)?;
    conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)
        .map_err(pragma_err)?;
    if read_only {
        conn.pragma_update(None, "query_only", "ON")
            .map_err(pragma_err)?;
    }
    Ok(())
}
