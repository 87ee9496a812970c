//! Data-access facade over visitors, exhibitions and tickets.
//!
//! # Responsibility
//! - Provide one entry point per entity per CRUD action plus three
//!   analytics queries.
//! - Translate every repository failure into a `PersistenceError` that
//!   names the failed operation and keeps the original cause.
//!
//! # Invariants
//! - Each call performs exactly one store operation.
//! - "Not found" on read-by-id is `Ok(None)`, never an error.
//! - Delete of a missing id is a silent no-op.
//! - Update of a missing id fails with `RepoError::NotFound` and inserts nothing.
//! - Values are persisted as given; discount/price ranges are the caller's
//!   concern.

use crate::db::schema::ensure_tables_present;
use crate::db::Store;
use crate::model::exhibition::{Exhibition, ExhibitionId};
use crate::model::ticket::{Ticket, TicketId};
use crate::model::visitor::{Visitor, VisitorId};
use crate::repo::analytics_repo::{AnalyticsRepository, SqliteAnalyticsRepository};
use crate::repo::exhibition_repo::{ExhibitionRepository, SqliteExhibitionRepository};
use crate::repo::ticket_repo::{SqliteTicketRepository, TicketRepository};
use crate::repo::visitor_repo::{SqliteVisitorRepository, VisitorRepository};
use crate::repo::{RepoError, RepoResult};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type FacadeResult<T> = Result<T, PersistenceError>;

/// Facade operation identity, used for error messages and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddVisitor,
    ListVisitors,
    GetVisitor,
    UpdateVisitor,
    DeleteVisitor,
    AddExhibition,
    ListExhibitions,
    GetExhibition,
    UpdateExhibition,
    DeleteExhibition,
    AddTicket,
    ListTickets,
    GetTicket,
    UpdateTicket,
    DeleteTicket,
    SoldTicketsCount,
    UniqueExhibitionsCount,
    AverageDiscount,
}

impl Operation {
    /// Stable snake_case name used in log events.
    pub fn name(self) -> &'static str {
        match self {
            Self::AddVisitor => "add_visitor",
            Self::ListVisitors => "list_visitors",
            Self::GetVisitor => "get_visitor",
            Self::UpdateVisitor => "update_visitor",
            Self::DeleteVisitor => "delete_visitor",
            Self::AddExhibition => "add_exhibition",
            Self::ListExhibitions => "list_exhibitions",
            Self::GetExhibition => "get_exhibition",
            Self::UpdateExhibition => "update_exhibition",
            Self::DeleteExhibition => "delete_exhibition",
            Self::AddTicket => "add_ticket",
            Self::ListTickets => "list_tickets",
            Self::GetTicket => "get_ticket",
            Self::UpdateTicket => "update_ticket",
            Self::DeleteTicket => "delete_ticket",
            Self::SoldTicketsCount => "sold_tickets_count",
            Self::UniqueExhibitionsCount => "unique_exhibitions_count",
            Self::AverageDiscount => "average_discount",
        }
    }

    /// Human-readable failure message for this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::AddVisitor => "failed to add visitor",
            Self::ListVisitors => "failed to load the visitor list",
            Self::GetVisitor => "failed to load visitor",
            Self::UpdateVisitor => "failed to update visitor",
            Self::DeleteVisitor => "failed to delete visitor",
            Self::AddExhibition => "failed to add exhibition",
            Self::ListExhibitions => "failed to load the exhibition list",
            Self::GetExhibition => "failed to load exhibition",
            Self::UpdateExhibition => "failed to update exhibition",
            Self::DeleteExhibition => "failed to delete exhibition",
            Self::AddTicket => "failed to add ticket",
            Self::ListTickets => "failed to load the ticket list",
            Self::GetTicket => "failed to load ticket",
            Self::UpdateTicket => "failed to update ticket",
            Self::DeleteTicket => "failed to delete ticket",
            Self::SoldTicketsCount => "failed to count sold tickets",
            Self::UniqueExhibitionsCount => "failed to count unique exhibitions",
            Self::AverageDiscount => "failed to compute the average discount",
        }
    }
}

/// Store failure surfaced by the facade.
#[derive(Debug)]
pub struct PersistenceError {
    pub operation: Operation,
    pub source: RepoError,
}

impl PersistenceError {
    /// Returns whether the failure was an update against a missing id.
    pub fn is_not_found(&self) -> bool {
        matches!(self.source, RepoError::NotFound { .. })
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.operation.failure_message(), self.source)
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Contract between the shell and the persistent store.
pub trait ExhibitionFacade {
    /// Inserts `visitor`, writes the assigned id back and returns it.
    fn add_visitor(&self, visitor: &mut Visitor) -> FacadeResult<VisitorId>;
    fn list_visitors(&self) -> FacadeResult<Vec<Visitor>>;
    fn get_visitor(&self, id: VisitorId) -> FacadeResult<Option<Visitor>>;
    fn update_visitor(&self, visitor: &Visitor) -> FacadeResult<()>;
    fn delete_visitor(&self, id: VisitorId) -> FacadeResult<()>;

    /// Inserts `exhibition`, writes the assigned id back and returns it.
    fn add_exhibition(&self, exhibition: &mut Exhibition) -> FacadeResult<ExhibitionId>;
    fn list_exhibitions(&self) -> FacadeResult<Vec<Exhibition>>;
    fn get_exhibition(&self, id: ExhibitionId) -> FacadeResult<Option<Exhibition>>;
    fn update_exhibition(&self, exhibition: &Exhibition) -> FacadeResult<()>;
    fn delete_exhibition(&self, id: ExhibitionId) -> FacadeResult<()>;

    /// Inserts `ticket`, writes the assigned id back and returns it.
    fn add_ticket(&self, ticket: &mut Ticket) -> FacadeResult<TicketId>;
    fn list_tickets(&self) -> FacadeResult<Vec<Ticket>>;
    fn get_ticket(&self, id: TicketId) -> FacadeResult<Option<Ticket>>;
    fn update_ticket(&self, ticket: &Ticket) -> FacadeResult<()>;
    fn delete_ticket(&self, id: TicketId) -> FacadeResult<()>;

    /// Number of tickets sold for `exhibition_id`.
    fn sold_tickets_count(&self, exhibition_id: ExhibitionId) -> FacadeResult<i64>;
    /// Number of distinct exhibitions `visitor_id` holds tickets for.
    fn unique_exhibitions_count(&self, visitor_id: VisitorId) -> FacadeResult<i64>;
    /// Average visitor discount per ticket sold for `exhibition_id`, or `0.0`.
    fn average_discount_for_exhibition(&self, exhibition_id: ExhibitionId) -> FacadeResult<f64>;
}

/// SQLite-backed facade borrowing an explicitly owned [`Store`].
pub struct DatabaseFacade<'store> {
    visitors: SqliteVisitorRepository<'store>,
    exhibitions: SqliteExhibitionRepository<'store>,
    tickets: SqliteTicketRepository<'store>,
    analytics: SqliteAnalyticsRepository<'store>,
}

impl<'store> DatabaseFacade<'store> {
    /// Builds a facade after checking that the schema is in place.
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        let conn = store.connection();
        ensure_tables_present(conn)?;
        Ok(Self {
            visitors: SqliteVisitorRepository::new(conn),
            exhibitions: SqliteExhibitionRepository::new(conn),
            tickets: SqliteTicketRepository::new(conn),
            analytics: SqliteAnalyticsRepository::new(conn),
        })
    }
}

impl ExhibitionFacade for DatabaseFacade<'_> {
    fn add_visitor(&self, visitor: &mut Visitor) -> FacadeResult<VisitorId> {
        let id = run(Operation::AddVisitor, || self.visitors.insert(visitor))?;
        visitor.id = id;
        Ok(id)
    }

    fn list_visitors(&self) -> FacadeResult<Vec<Visitor>> {
        run(Operation::ListVisitors, || self.visitors.list())
    }

    fn get_visitor(&self, id: VisitorId) -> FacadeResult<Option<Visitor>> {
        run(Operation::GetVisitor, || self.visitors.get(id))
    }

    fn update_visitor(&self, visitor: &Visitor) -> FacadeResult<()> {
        run(Operation::UpdateVisitor, || self.visitors.update(visitor))
    }

    fn delete_visitor(&self, id: VisitorId) -> FacadeResult<()> {
        run(Operation::DeleteVisitor, || self.visitors.delete(id)).map(drop)
    }

    fn add_exhibition(&self, exhibition: &mut Exhibition) -> FacadeResult<ExhibitionId> {
        let id = run(Operation::AddExhibition, || self.exhibitions.insert(exhibition))?;
        exhibition.id = id;
        Ok(id)
    }

    fn list_exhibitions(&self) -> FacadeResult<Vec<Exhibition>> {
        run(Operation::ListExhibitions, || self.exhibitions.list())
    }

    fn get_exhibition(&self, id: ExhibitionId) -> FacadeResult<Option<Exhibition>> {
        run(Operation::GetExhibition, || self.exhibitions.get(id))
    }

    fn update_exhibition(&self, exhibition: &Exhibition) -> FacadeResult<()> {
        run(Operation::UpdateExhibition, || {
            self.exhibitions.update(exhibition)
        })
    }

    fn delete_exhibition(&self, id: ExhibitionId) -> FacadeResult<()> {
        run(Operation::DeleteExhibition, || self.exhibitions.delete(id)).map(drop)
    }

    fn add_ticket(&self, ticket: &mut Ticket) -> FacadeResult<TicketId> {
        let id = run(Operation::AddTicket, || self.tickets.insert(ticket))?;
        ticket.id = id;
        Ok(id)
    }

    fn list_tickets(&self) -> FacadeResult<Vec<Ticket>> {
        run(Operation::ListTickets, || self.tickets.list())
    }

    fn get_ticket(&self, id: TicketId) -> FacadeResult<Option<Ticket>> {
        run(Operation::GetTicket, || self.tickets.get(id))
    }

    fn update_ticket(&self, ticket: &Ticket) -> FacadeResult<()> {
        run(Operation::UpdateTicket, || self.tickets.update(ticket))
    }

    fn delete_ticket(&self, id: TicketId) -> FacadeResult<()> {
        run(Operation::DeleteTicket, || self.tickets.delete(id)).map(drop)
    }

    fn sold_tickets_count(&self, exhibition_id: ExhibitionId) -> FacadeResult<i64> {
        run(Operation::SoldTicketsCount, || {
            self.analytics.sold_tickets_count(exhibition_id)
        })
    }

    fn unique_exhibitions_count(&self, visitor_id: VisitorId) -> FacadeResult<i64> {
        run(Operation::UniqueExhibitionsCount, || {
            self.analytics.unique_exhibitions_count(visitor_id)
        })
    }

    fn average_discount_for_exhibition(&self, exhibition_id: ExhibitionId) -> FacadeResult<f64> {
        run(Operation::AverageDiscount, || {
            self.analytics.average_discount_for_exhibition(exhibition_id)
        })
    }
}

fn run<T>(operation: Operation, call: impl FnOnce() -> RepoResult<T>) -> FacadeResult<T> {
    let started_at = Instant::now();
    match call() {
        Ok(value) => {
            debug!(
                "event=facade_call module=facade op={} status=ok duration_ms={}",
                operation.name(),
                started_at.elapsed().as_millis()
            );
            Ok(value)
        }
        Err(source) => {
            warn!(
                "event=facade_call module=facade op={} status=error duration_ms={} error={}",
                operation.name(),
                started_at.elapsed().as_millis(),
                source
            );
            Err(PersistenceError { operation, source })
        }
    }
}
