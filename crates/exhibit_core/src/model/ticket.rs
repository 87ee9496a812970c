//! Ticket domain model.
//!
//! # Invariants
//! - `visitor_id` and `exhibition_id` reference existing rows; the store
//!   enforces this with foreign keys and cascades deletes.
//! - `price` is expected to be positive but is not checked here.

use super::exhibition::ExhibitionId;
use super::visitor::VisitorId;
use super::UNSAVED_ID;
use serde::{Deserialize, Serialize};

/// Store-assigned ticket identifier.
pub type TicketId = i64;

/// A purchase record linking one visitor to one exhibition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub visitor_id: VisitorId,
    pub exhibition_id: ExhibitionId,
    pub price: f64,
}

impl Ticket {
    /// Creates an unsaved ticket; the store assigns the id on insert.
    pub fn new(visitor_id: VisitorId, exhibition_id: ExhibitionId, price: f64) -> Self {
        Self {
            id: UNSAVED_ID,
            visitor_id,
            exhibition_id,
            price,
        }
    }

    /// Returns whether this record carries a store-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}
