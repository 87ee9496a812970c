//! Core data access for the exhibition ticketing manager.
//! Visitors, exhibitions and tickets live in SQLite; callers go through
//! the facade.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{DbError, Store};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::exhibition::{Exhibition, ExhibitionId};
pub use model::ticket::{Ticket, TicketId};
pub use model::visitor::{Visitor, VisitorId};
pub use model::UNSAVED_ID;
pub use repo::{RepoError, RepoResult};
pub use service::facade::{
    DatabaseFacade, ExhibitionFacade, FacadeResult, Operation, PersistenceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
