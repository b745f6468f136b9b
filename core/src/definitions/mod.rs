//! Definition files and the live registry
//!
//! This module provides:
//! - **BossDefinition / LootTable / ArenaDef**: static config loaded
//!   from TOML files in the definitions directory
//! - **Loader**: per-file TOML parsing with validation
//! - **DefinitionRegistry**: the live lookup, swapped atomically on a
//!   successful reload (a failed reload never empties it)

mod arena;
mod boss;
mod error;
mod loader;
mod loot;
mod registry;

pub use arena::*;
pub use boss::*;
pub use error::*;
pub use loader::*;
pub use loot::*;
pub use registry::*;

#[cfg(test)]
mod registry_tests;
