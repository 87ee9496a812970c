//! Ticket repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts and updates referencing a missing visitor or exhibition fail
//!   with a foreign key constraint error from the store.

use crate::model::ticket::{Ticket, TicketId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TICKET_SELECT_SQL: &str = "SELECT id, visitor_id, exhibition_id, price FROM tickets";

/// Repository interface for ticket CRUD operations.
pub trait TicketRepository {
    /// Inserts a row and returns the store-assigned id. `ticket.id` is ignored.
    fn insert(&self, ticket: &Ticket) -> RepoResult<TicketId>;
    fn list(&self) -> RepoResult<Vec<Ticket>>;
    fn get(&self, id: TicketId) -> RepoResult<Option<Ticket>>;
    fn update(&self, ticket: &Ticket) -> RepoResult<()>;
    fn delete(&self, id: TicketId) -> RepoResult<usize>;
}

/// SQLite-backed ticket repository.
pub struct SqliteTicketRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTicketRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TicketRepository for SqliteTicketRepository<'_> {
    fn insert(&self, ticket: &Ticket) -> RepoResult<TicketId> {
        self.conn.execute(
            "INSERT INTO tickets (visitor_id, exhibition_id, price) VALUES (?1, ?2, ?3);",
            params![ticket.visitor_id, ticket.exhibition_id, ticket.price],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> RepoResult<Vec<Ticket>> {
        let mut stmt = self.conn.prepare(&format!("{TICKET_SELECT_SQL};"))?;
        let rows = stmt.query_map([], parse_ticket_row)?;
        let tickets = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(tickets)
    }

    fn get(&self, id: TicketId) -> RepoResult<Option<Ticket>> {
        let ticket = self
            .conn
            .query_row(
                &format!("{TICKET_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_ticket_row,
            )
            .optional()?;
        Ok(ticket)
    }

    fn update(&self, ticket: &Ticket) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tickets
             SET
                visitor_id = ?1,
                exhibition_id = ?2,
                price = ?3
             WHERE id = ?4;",
            params![
                ticket.visitor_id,
                ticket.exhibition_id,
                ticket.price,
                ticket.id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "ticket",
                id: ticket.id,
            });
        }

        Ok(())
    }

    fn delete(&self, id: TicketId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM tickets WHERE id = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_ticket_row(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get("id")?,
        visitor_id: row.get("visitor_id")?,
        exhibition_id: row.get("exhibition_id")?,
        price: row.get("price")?,
    })
}
