//! Domain records for the exhibition ticketing inventory.
//!
//! # Responsibility
//! - Define the three persisted entities: visitors, exhibitions, tickets.
//! - Keep identity semantics explicit through id aliases.
//!
//! # Invariants
//! - Ids are assigned by the store on insert and never reused.
//! - A record with `UNSAVED_ID` has not been persisted yet.
//! - Range checks (discount, price) are not enforced here.

pub mod exhibition;
pub mod ticket;
pub mod visitor;

/// Placeholder id carried by records that have not been inserted yet.
pub const UNSAVED_ID: i64 = 0;
