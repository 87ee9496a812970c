//! Idempotent schema bootstrap.
//!
//! # Invariants
//! - `ensure_schema` only creates missing objects; it never alters or drops.
//! - `AUTOINCREMENT` keeps ids from being reused after deletes.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables every facade operation depends on.
pub const REQUIRED_TABLES: &[&str] = &["visitors", "exhibitions", "tickets"];

/// Creates the visitors/exhibitions/tickets tables if they do not exist.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Verifies that a connection carries every required table.
///
/// Used when a connection was not opened through `Store`.
pub fn ensure_tables_present(conn: &Connection) -> DbResult<()> {
    for table in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(DbError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
