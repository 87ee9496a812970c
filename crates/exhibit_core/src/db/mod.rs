//! SQLite store handle and schema bootstrap.
//!
//! # Responsibility
//! - Own the single process-wide SQLite connection.
//! - Ensure the visitors/exhibitions/tickets schema exists before use.
//!
//! # Invariants
//! - Connections handed out by `Store` have `foreign_keys=ON`.
//! - Core code must not read/write application data before the schema
//!   bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod schema;
mod store;

pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    MissingRequiredTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing from the database")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
