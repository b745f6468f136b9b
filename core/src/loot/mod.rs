//! Loot distribution
//!
//! This module provides:
//! - **LootTableRegistry**: read-mostly boss-name → loot table lookup
//! - **ChestLedger**: per-location loot ledgers with at-most-once claim
//!   semantics and a time-bounded chest lifecycle

mod ledger;
mod tables;

pub use ledger::*;
pub use tables::*;
