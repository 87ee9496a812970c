//! Store handle owning the SQLite connection.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and bootstrap the schema.
//! - Release the connection deterministically on `close`.
//!
//! # Invariants
//! - A `Store` is only handed out once `foreign_keys=ON` and the schema exist.
//! - One `Store` per process; no pooling.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use crate::config::DatabaseConfig;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Explicitly owned handle to the persistent store.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    mode: &'static str,
}

impl Store {
    /// Opens a SQLite database file and bootstraps the schema.
    ///
    /// # Side effects
    /// - Creates the file when it does not exist.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Self::open_logged("file", || Connection::open(path))
    }

    /// Opens a private in-memory database and bootstraps the schema.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open_logged("memory", Connection::open_in_memory)
    }

    /// Opens the database named by the configuration's `database` key.
    pub fn open_with(config: &DatabaseConfig) -> DbResult<Self> {
        info!(
            "event=db_config module=db status=ok target={}",
            config.redacted_connection_string()
        );
        Self::open(&config.database)
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection and reports any failure to flush/finalize.
    pub fn close(self) -> DbResult<()> {
        let mode = self.mode;
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok mode={mode}");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=db_close module=db status=error mode={mode} error_code=db_close_failed error={err}"
                );
                Err(DbError::Sqlite(err))
            }
        }
    }

    fn open_logged(
        mode: &'static str,
        open: impl FnOnce() -> rusqlite::Result<Connection>,
    ) -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start mode={mode}");

        let conn = match open() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match bootstrap_connection(&conn) {
            Ok(()) => {
                info!(
                    "event=db_open module=db status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn, mode })
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)?;
    Ok(())
}
