//! Visitor domain model.

use super::UNSAVED_ID;
use serde::{Deserialize, Serialize};

/// Store-assigned visitor identifier.
pub type VisitorId = i64;

/// A person who may hold tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: VisitorId,
    pub name: String,
    /// Discount percentage. The input layer keeps it within 0..=100.
    pub discount: i32,
}

impl Visitor {
    /// Creates an unsaved visitor; the store assigns the id on insert.
    pub fn new(name: impl Into<String>, discount: i32) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            discount,
        }
    }

    /// Returns whether this record carries a store-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}
