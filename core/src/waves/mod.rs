//! Follow-up mob waves
//!
//! Bosses with `extra_mobs` configured get `waves` single-shot timers
//! at cumulative delays. Each wave re-checks the boss at fire time:
//! still tracked, and still alive in the world. A failed check skips
//! that wave's spawn and nothing else; timers are never forcibly
//! cancelled. Untracking the boss therefore silences every wave that
//! has not yet fired, while waves that already fired stay fired.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use uuid::Uuid;

use crate::definitions::ExtraMobs;
use crate::tracking::BossTracker;
use crate::world::{Vec3, WorldHandle};

#[cfg(test)]
mod scheduler_tests;

/// Maximum x/z distance a wave mob spawns from the boss's spawn point.
const WAVE_SPAWN_SPREAD: f64 = 5.0;

/// Schedules delayed, self-gating mob waves for tracked bosses.
pub struct WaveScheduler {
    tracker: Arc<BossTracker>,
}

impl WaveScheduler {
    pub fn new(tracker: Arc<BossTracker>) -> Self {
        Self { tracker }
    }

    /// Arm `extra.waves` single-shot timers for `boss_uuid`. Wave `i`
    /// fires after `wave_delay * (i + 1)`.
    pub fn schedule(
        &self,
        world: Arc<WorldHandle>,
        boss_uuid: Uuid,
        extra: &ExtraMobs,
        spawn_pos: Vec3,
    ) {
        if extra.waves == 0 || extra.entity_kind.trim().is_empty() {
            return;
        }

        let delay = Duration::from_secs_f64(extra.wave_delay_secs.max(0.0));
        let mobs_per_wave = extra.mobs_per_wave.max(1);

        for wave in 0..extra.waves {
            let fire_in = delay * (wave + 1);
            let tracker = Arc::clone(&self.tracker);
            let world = Arc::clone(&world);
            let kind = extra.entity_kind.clone();

            tracing::debug!(
                %boss_uuid,
                wave = wave + 1,
                fire_in_secs = fire_in.as_secs_f64(),
                "wave scheduled"
            );

            tokio::spawn(async move {
                tokio::time::sleep(fire_in).await;
                fire_wave(&tracker, &world, boss_uuid, wave, &kind, mobs_per_wave, spawn_pos);
            });
        }
    }
}

fn fire_wave(
    tracker: &BossTracker,
    world: &WorldHandle,
    boss_uuid: Uuid,
    wave: u32,
    kind: &str,
    mobs_per_wave: u32,
    spawn_pos: Vec3,
) {
    // Self-gate: the boss may have died or expired since scheduling.
    if !tracker.is_tracked(boss_uuid) {
        tracing::info!(%boss_uuid, wave = wave + 1, "boss no longer tracked, skipping wave");
        return;
    }
    if !world.api().entity_alive_and_healthy(boss_uuid) {
        tracing::info!(%boss_uuid, wave = wave + 1, "boss entity dead or gone, skipping wave");
        return;
    }

    tracing::info!(%boss_uuid, wave = wave + 1, mobs = mobs_per_wave, "spawning wave");

    let kind = kind.to_string();
    world.execute(move |api, _chests| {
        let mut rng = rand::rng();
        for _ in 0..mobs_per_wave {
            let pos = spawn_pos.offset(
                (rng.random::<f64>() - 0.5) * WAVE_SPAWN_SPREAD,
                0.0,
                (rng.random::<f64>() - 0.5) * WAVE_SPAWN_SPREAD,
            );
            if api.spawn_entity(&kind, pos, Vec3::default()).is_none() {
                tracing::warn!(kind = %kind, "wave mob spawn failed");
            }
        }
    });
}
