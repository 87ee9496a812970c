//! Exhibition domain model.
//!
//! # Invariants
//! - `date` is always UTC; persisted as epoch milliseconds.

use super::UNSAVED_ID;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned exhibition identifier.
pub type ExhibitionId = i64;

/// A dated event that can be ticketed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibition {
    pub id: ExhibitionId,
    pub name: String,
    pub date: DateTime<Utc>,
}

impl Exhibition {
    /// Creates an unsaved exhibition; the store assigns the id on insert.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            date,
        }
    }

    /// Creates an unsaved exhibition starting at UTC midnight of `day`.
    pub fn on_day(name: impl Into<String>, day: NaiveDate) -> Self {
        Self::new(name, day.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// Returns whether this record carries a store-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}
