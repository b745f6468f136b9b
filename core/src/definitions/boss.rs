//! Boss definition types
//!
//! Loaded from `bosses.toml`, one `[[boss]]` block per definition.
//! Immutable once loaded; owned by the [`DefinitionRegistry`].
//!
//! [`DefinitionRegistry`]: super::DefinitionRegistry

use serde::{Deserialize, Serialize};

/// Root structure for the boss definitions file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossFile {
    #[serde(default, rename = "boss")]
    pub bosses: Vec<BossDefinition>,
}

/// Static configuration for one spawnable boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossDefinition {
    /// Display name, also the spawn lookup key (case-insensitive).
    pub boss_name: String,

    /// Entity kind handed to the world's spawn capability.
    pub entity_kind: String,

    /// How many entities one spawn request produces.
    #[serde(default = "default_amount")]
    pub amount: u32,

    /// Base stat multipliers before player scaling.
    #[serde(default)]
    pub modifiers: Modifiers,

    /// Added per participant beyond the first.
    #[serde(default)]
    pub per_player_increase: PerPlayerIncrease,

    /// Optional follow-up mob waves while the boss lives.
    #[serde(default)]
    pub extra_mobs: Option<ExtraMobs>,
}

/// Base multipliers. Missing fields are neutral.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default = "default_one")]
    pub hp: f32,
    #[serde(default = "default_one")]
    pub damage: f32,
    #[serde(default = "default_one")]
    pub size: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            hp: 1.0,
            damage: 1.0,
            size: 1.0,
        }
    }
}

/// Per-player increases. Missing fields add nothing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PerPlayerIncrease {
    #[serde(default)]
    pub hp: f32,
    #[serde(default)]
    pub damage: f32,
    #[serde(default)]
    pub size: f32,
}

/// Follow-up mob waves, gated on the boss still being tracked and alive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraMobs {
    /// Entity kind spawned each wave.
    pub entity_kind: String,

    /// Number of waves. Zero disables the scheduler.
    #[serde(default)]
    pub waves: u32,

    /// Entities per wave.
    #[serde(default = "default_mobs_per_wave")]
    pub mobs_per_wave: u32,

    /// Delay between waves; wave `i` fires at `delay * (i + 1)`.
    #[serde(default = "default_wave_delay")]
    pub wave_delay_secs: f64,
}

fn default_amount() -> u32 {
    1
}

fn default_one() -> f32 {
    1.0
}

fn default_mobs_per_wave() -> u32 {
    3
}

fn default_wave_delay() -> f64 {
    30.0
}
