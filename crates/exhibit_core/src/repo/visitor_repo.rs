//! Visitor repository contract and SQLite implementation.

use crate::model::visitor::{Visitor, VisitorId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const VISITOR_SELECT_SQL: &str = "SELECT id, name, discount FROM visitors";

/// Repository interface for visitor CRUD operations.
pub trait VisitorRepository {
    /// Inserts a row and returns the store-assigned id. `visitor.id` is ignored.
    fn insert(&self, visitor: &Visitor) -> RepoResult<VisitorId>;
    fn list(&self) -> RepoResult<Vec<Visitor>>;
    fn get(&self, id: VisitorId) -> RepoResult<Option<Visitor>>;
    fn update(&self, visitor: &Visitor) -> RepoResult<()>;
    /// Returns the number of removed rows; tickets cascade with the visitor.
    fn delete(&self, id: VisitorId) -> RepoResult<usize>;
}

/// SQLite-backed visitor repository.
pub struct SqliteVisitorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVisitorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl VisitorRepository for SqliteVisitorRepository<'_> {
    fn insert(&self, visitor: &Visitor) -> RepoResult<VisitorId> {
        self.conn.execute(
            "INSERT INTO visitors (name, discount) VALUES (?1, ?2);",
            params![visitor.name.as_str(), visitor.discount],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> RepoResult<Vec<Visitor>> {
        let mut stmt = self.conn.prepare(&format!("{VISITOR_SELECT_SQL};"))?;
        let rows = stmt.query_map([], parse_visitor_row)?;
        let visitors = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(visitors)
    }

    fn get(&self, id: VisitorId) -> RepoResult<Option<Visitor>> {
        let visitor = self
            .conn
            .query_row(
                &format!("{VISITOR_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_visitor_row,
            )
            .optional()?;
        Ok(visitor)
    }

    fn update(&self, visitor: &Visitor) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE visitors SET name = ?1, discount = ?2 WHERE id = ?3;",
            params![visitor.name.as_str(), visitor.discount, visitor.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "visitor",
                id: visitor.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: VisitorId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM visitors WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_visitor_row(row: &Row<'_>) -> rusqlite::Result<Visitor> {
    Ok(Visitor {
        id: row.get("id")?,
        name: row.get("name")?,
        discount: row.get("discount")?,
    })
}
