//! Arena definition types
//!
//! Loaded from `arenas.toml`. Arenas anchor a boss spawn point to a
//! named location. The arena eligibility radius is parsed and kept but
//! loot eligibility is driven by the loot table's radius; the arena
//! value is reserved for future participation gating.

use serde::{Deserialize, Serialize};

/// Root structure for the arenas file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaFile {
    #[serde(default, rename = "arena")]
    pub arenas: Vec<ArenaDef>,
}

/// A named spawn anchor for boss encounters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaDef {
    /// Lookup key (case-insensitive).
    pub id: String,

    /// World this arena lives in.
    #[serde(default)]
    pub world_id: String,

    /// Anchor point: the boss spawns here and the chest drops here.
    pub boss_spawn: [i32; 3],

    /// Horizontal participation radius. Not yet consumed.
    #[serde(default = "default_eligibility_radius")]
    pub eligibility_radius: f64,

    /// How long the loot chest survives after boss death.
    #[serde(default = "default_chest_lifetime")]
    pub chest_lifetime_secs: u64,
}

fn default_eligibility_radius() -> f64 {
    40.0
}

fn default_chest_lifetime() -> u64 {
    120
}
