//! Per-encounter stat scaling
//!
//! Pure multiplier math: a boss's base modifiers plus a per-player
//! increase for every participant beyond the first.

use crate::definitions::BossDefinition;

/// Resolved multipliers for one spawned encounter.
///
/// Created fresh per spawn; never shared between encounters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossModifiers {
    pub hp_multiplier: f32,
    pub damage_multiplier: f32,
    pub scale_multiplier: f32,
}

impl Default for BossModifiers {
    fn default() -> Self {
        Self {
            hp_multiplier: 1.0,
            damage_multiplier: 1.0,
            scale_multiplier: 1.0,
        }
    }
}

/// One axis: `base + per_player * (player_count - 1)`.
///
/// A solo encounter gets exactly the base modifier.
pub fn scaled_multiplier(base: f32, per_player: f32, player_count: usize) -> f32 {
    base + per_player * player_count.saturating_sub(1) as f32
}

/// Resolve all three axes for a definition and participant count.
pub fn scaled_modifiers(def: &BossDefinition, player_count: usize) -> BossModifiers {
    BossModifiers {
        hp_multiplier: scaled_multiplier(
            def.modifiers.hp,
            def.per_player_increase.hp,
            player_count,
        ),
        damage_multiplier: scaled_multiplier(
            def.modifiers.damage,
            def.per_player_increase.damage,
            player_count,
        ),
        scale_multiplier: scaled_multiplier(
            def.modifiers.size,
            def.per_player_increase.size,
            player_count,
        ),
    }
}
