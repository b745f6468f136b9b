//! Spawn orchestration
//!
//! Composes the definition registry, scaler, tracker and wave scheduler
//! to execute one boss-spawn request end to end.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::definitions::{ArenaDef, DefinitionRegistry};
use crate::scaling::{self, BossModifiers};
use crate::tracking::{BossData, BossTracker};
use crate::waves::WaveScheduler;
use crate::world::{EntityId, Stat, Vec3, WorldHandle};

#[cfg(test)]
mod tests;

/// Batch-mates spread out diagonally from the requested position.
const BATCH_SPREAD: f64 = 1.2;

/// Errors a spawn request can report to its caller.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("boss definition not found: {boss_id}")]
    DefinitionNotFound { boss_id: String },

    #[error("arena not found: {arena_id}")]
    ArenaNotFound { arena_id: String },

    #[error("every spawn attempt failed for boss '{boss_id}'")]
    NoneSpawned { boss_id: String },
}

/// Executes boss-spawn requests.
pub struct SpawnOrchestrator {
    definitions: Arc<DefinitionRegistry>,
    tracker: Arc<BossTracker>,
    waves: WaveScheduler,
    tracking_ttl: Duration,
    player_query_radius: f64,
}

impl SpawnOrchestrator {
    pub fn new(
        definitions: Arc<DefinitionRegistry>,
        tracker: Arc<BossTracker>,
        tracking_ttl: Duration,
        player_query_radius: f64,
    ) -> Self {
        let waves = WaveScheduler::new(Arc::clone(&tracker));
        Self {
            definitions,
            tracker,
            waves,
            tracking_ttl,
            player_query_radius,
        }
    }

    /// Spawn a boss at an explicit position. Returns the primary boss
    /// uuid, the entry later death handling keys on.
    pub fn spawn_boss(
        &self,
        boss_id: &str,
        world: &Arc<WorldHandle>,
        position: Vec3,
    ) -> Result<Uuid, SpawnError> {
        self.spawn_internal(boss_id, world, position, None)
    }

    /// Spawn a boss at a configured arena's anchor point.
    pub fn spawn_in_arena(
        &self,
        boss_id: &str,
        arena_id: &str,
        world: &Arc<WorldHandle>,
    ) -> Result<Uuid, SpawnError> {
        let arena = self
            .definitions
            .arena(arena_id)
            .ok_or_else(|| SpawnError::ArenaNotFound {
                arena_id: arena_id.to_string(),
            })?;
        let position = arena_anchor(&arena);
        self.spawn_internal(boss_id, world, position, Some(arena.id.clone()))
    }

    fn spawn_internal(
        &self,
        boss_id: &str,
        world: &Arc<WorldHandle>,
        position: Vec3,
        arena_id: Option<String>,
    ) -> Result<Uuid, SpawnError> {
        let def = self
            .definitions
            .boss(boss_id)
            .ok_or_else(|| SpawnError::DefinitionNotFound {
                boss_id: boss_id.to_string(),
            })?;

        let player_count = world
            .api()
            .players_in_radius(position, self.player_query_radius)
            .len();
        let mods = scaling::scaled_modifiers(&def, player_count);

        tracing::info!(
            boss = %def.boss_name,
            world = %world.name(),
            %position,
            player_count,
            hp = mods.hp_multiplier,
            damage = mods.damage_multiplier,
            scale = mods.scale_multiplier,
            "spawning boss"
        );

        let mut primary: Option<Uuid> = None;
        for i in 0..def.amount {
            let offset = i as f64 * BATCH_SPREAD;
            let pos = position.offset(offset, 0.0, offset);

            let Some((entity, uuid)) = world.api().spawn_entity(&def.entity_kind, pos, Vec3::default())
            else {
                tracing::warn!(kind = %def.entity_kind, %pos, "spawn attempt failed, skipping unit");
                continue;
            };

            apply_modifiers(world, entity, mods);

            // Only the first successful spawn becomes the tracked boss;
            // batch-mates share its lifecycle.
            if primary.is_none() {
                self.tracker.track(
                    uuid,
                    BossData {
                        boss_name: def.boss_name.clone(),
                        modifiers: mods,
                        arena_id: arena_id.clone(),
                        world: Arc::clone(world),
                        spawn_location: position,
                    },
                    self.tracking_ttl,
                );
                primary = Some(uuid);
            }
        }

        let primary = primary.ok_or_else(|| SpawnError::NoneSpawned {
            boss_id: boss_id.to_string(),
        })?;

        if let Some(extra) = &def.extra_mobs {
            self.waves
                .schedule(Arc::clone(world), primary, extra, position);
        }

        Ok(primary)
    }
}

fn apply_modifiers(world: &WorldHandle, entity: EntityId, mods: BossModifiers) {
    let stats = [
        (Stat::Health, mods.hp_multiplier),
        (Stat::Damage, mods.damage_multiplier),
    ];
    for (stat, multiplier) in stats {
        if let Err(err) = world.api().apply_stat_multiplier(entity, stat, multiplier) {
            tracing::warn!(%entity, %err, "stat modifier skipped");
        }
    }

    if mods.scale_multiplier != 1.0
        && let Err(err) = world.api().apply_scale_multiplier(entity, mods.scale_multiplier)
    {
        tracing::warn!(%entity, %err, "scale modifier skipped");
    }
}

fn arena_anchor(arena: &ArenaDef) -> Vec3 {
    Vec3::new(
        arena.boss_spawn[0] as f64,
        arena.boss_spawn[1] as f64,
        arena.boss_spawn[2] as f64,
    )
}
