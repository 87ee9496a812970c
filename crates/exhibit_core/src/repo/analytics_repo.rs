//! Read-only aggregate queries over tickets and visitors.
//!
//! # Invariants
//! - Every query is a single aggregate statement; no rows are modified.
//! - Averages are taken over the ticket join, so a visitor holding two
//!   tickets for the same exhibition contributes twice.
//! - Empty inputs yield zero rather than an error.

use crate::model::exhibition::ExhibitionId;
use crate::model::visitor::VisitorId;
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Repository interface for ticket analytics.
pub trait AnalyticsRepository {
    fn sold_tickets_count(&self, exhibition_id: ExhibitionId) -> RepoResult<i64>;
    fn unique_exhibitions_count(&self, visitor_id: VisitorId) -> RepoResult<i64>;
    fn average_discount_for_exhibition(&self, exhibition_id: ExhibitionId) -> RepoResult<f64>;
}

/// SQLite-backed analytics repository.
pub struct SqliteAnalyticsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnalyticsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AnalyticsRepository for SqliteAnalyticsRepository<'_> {
    fn sold_tickets_count(&self, exhibition_id: ExhibitionId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE exhibition_id = ?1;",
            [exhibition_id],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(count)
    }

    fn unique_exhibitions_count(&self, visitor_id: VisitorId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(DISTINCT exhibition_id) FROM tickets WHERE visitor_id = ?1;",
            [visitor_id],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(count)
    }

    fn average_discount_for_exhibition(&self, exhibition_id: ExhibitionId) -> RepoResult<f64> {
        // AVG over an empty join is NULL.
        let average = self.conn.query_row(
            "SELECT AVG(v.discount)
             FROM tickets t
             JOIN visitors v ON v.id = t.visitor_id
             WHERE t.exhibition_id = ?1;",
            [exhibition_id],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(average.unwrap_or(0.0))
    }
}
