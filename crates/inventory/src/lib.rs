//! Inventory domain module.
//!
//! Stock movements and the ledger rule that turns a movement into a new
//! stock level, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage). Stores are responsible for applying the rule atomically.

pub mod ledger;
pub mod movement;

pub use ledger::LedgerError;
pub use movement::{InventoryMovement, MovementDetail, MovementKind, NewMovement};
