//! Loot table definition types
//!
//! Loaded from `loot_tables.toml`, one `[[table]]` block per boss.

use serde::{Deserialize, Serialize};

/// Root structure for the loot tables file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LootFile {
    #[serde(default, rename = "table")]
    pub tables: Vec<LootTable>,
}

/// Possible drops for one boss, plus the eligibility radius players must
/// be within at the moment of death.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootTable {
    /// Boss name this table belongs to (case-insensitive lookup).
    pub boss_name: String,

    /// How close players must be to the death location to receive loot.
    #[serde(default = "default_loot_radius")]
    pub loot_radius: f64,

    #[serde(default, rename = "item")]
    pub items: Vec<LootItem>,
}

/// A single entry within a loot table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootItem {
    pub item_id: String,

    /// Independent drop probability in `[0, 1]`.
    pub drop_chance: f64,

    pub min_amount: u32,
    pub max_amount: u32,
}

fn default_loot_radius() -> f64 {
    40.0
}
