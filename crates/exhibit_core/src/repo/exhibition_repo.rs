//! Exhibition repository contract and SQLite implementation.
//!
//! # Invariants
//! - `date` is stored as UTC epoch milliseconds in `exhibitions.date`.
//! - Read paths reject timestamps chrono cannot represent instead of
//!   masking them.

use crate::model::exhibition::{Exhibition, ExhibitionId};
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

const EXHIBITION_SELECT_SQL: &str = "SELECT id, name, date FROM exhibitions";

/// Repository interface for exhibition CRUD operations.
pub trait ExhibitionRepository {
    /// Inserts a row and returns the store-assigned id. `exhibition.id` is ignored.
    fn insert(&self, exhibition: &Exhibition) -> RepoResult<ExhibitionId>;
    fn list(&self) -> RepoResult<Vec<Exhibition>>;
    fn get(&self, id: ExhibitionId) -> RepoResult<Option<Exhibition>>;
    fn update(&self, exhibition: &Exhibition) -> RepoResult<()>;
    /// Returns the number of removed rows; tickets cascade with the exhibition.
    fn delete(&self, id: ExhibitionId) -> RepoResult<usize>;
}

/// SQLite-backed exhibition repository.
pub struct SqliteExhibitionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExhibitionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExhibitionRepository for SqliteExhibitionRepository<'_> {
    fn insert(&self, exhibition: &Exhibition) -> RepoResult<ExhibitionId> {
        self.conn.execute(
            "INSERT INTO exhibitions (name, date) VALUES (?1, ?2);",
            params![
                exhibition.name.as_str(),
                exhibition.date.timestamp_millis()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> RepoResult<Vec<Exhibition>> {
        let mut stmt = self.conn.prepare(&format!("{EXHIBITION_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut exhibitions = Vec::new();

        while let Some(row) = rows.next()? {
            exhibitions.push(parse_exhibition_row(row)?);
        }

        Ok(exhibitions)
    }

    fn get(&self, id: ExhibitionId) -> RepoResult<Option<Exhibition>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXHIBITION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_exhibition_row(row)?));
        }

        Ok(None)
    }

    fn update(&self, exhibition: &Exhibition) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE exhibitions SET name = ?1, date = ?2 WHERE id = ?3;",
            params![
                exhibition.name.as_str(),
                exhibition.date.timestamp_millis(),
                exhibition.id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "exhibition",
                id: exhibition.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: ExhibitionId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM exhibitions WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_exhibition_row(row: &Row<'_>) -> RepoResult<Exhibition> {
    let date_ms: i64 = row.get("date")?;
    let date = DateTime::<Utc>::from_timestamp_millis(date_ms).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{date_ms}` in exhibitions.date"
        ))
    })?;

    Ok(Exhibition {
        id: row.get("id")?,
        name: row.get("name")?,
        date,
    })
}
