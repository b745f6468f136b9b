//! Tests for wave scheduling and self-gating

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use super::WaveScheduler;
use crate::definitions::ExtraMobs;
use crate::scaling::BossModifiers;
use crate::test_support::{settle, test_world};
use crate::tracking::{BossData, BossTracker};
use crate::world::Vec3;

const SPAWN_POS: Vec3 = Vec3::new(0.0, 64.0, 0.0);

fn extra(waves: u32, mobs_per_wave: u32, delay_secs: f64) -> ExtraMobs {
    ExtraMobs {
        entity_kind: "Bat".into(),
        waves,
        mobs_per_wave,
        wave_delay_secs: delay_secs,
    }
}

fn track(
    tracker: &BossTracker,
    world: &Arc<crate::world::WorldHandle>,
) -> Uuid {
    let uuid = Uuid::new_v4();
    tracker.track(
        uuid,
        BossData {
            boss_name: "Example Boss".into(),
            modifiers: BossModifiers::default(),
            arena_id: None,
            world: Arc::clone(world),
            spawn_location: SPAWN_POS,
        },
        Duration::from_secs(3600),
    );
    uuid
}

#[tokio::test(start_paused = true)]
async fn waves_fire_at_cumulative_delays() {
    let (world, handle) = test_world();
    let tracker = Arc::new(BossTracker::new());
    let boss = track(&tracker, &handle);

    let scheduler = WaveScheduler::new(Arc::clone(&tracker));
    scheduler.schedule(Arc::clone(&handle), boss, &extra(3, 2, 10.0), SPAWN_POS);
    // Let the wave tasks register their deadlines.
    settle().await;

    // Nothing before the first delay.
    tokio::time::advance(Duration::from_secs(9)).await;
    settle().await;
    assert_eq!(world.spawn_count(), 0);

    // Wave 1 at t=10.
    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;
    assert_eq!(world.spawn_count(), 2);

    // Waves 2 and 3 at t=20 and t=30.
    tokio::time::advance(Duration::from_secs(20)).await;
    settle().await;
    assert_eq!(world.spawn_count(), 6);
    assert!(world.spawned_kinds().iter().all(|k| k == "Bat"));
}

#[tokio::test(start_paused = true)]
async fn untracked_boss_silences_remaining_waves() {
    let (world, handle) = test_world();
    let tracker = Arc::new(BossTracker::new());
    let boss = track(&tracker, &handle);

    let scheduler = WaveScheduler::new(Arc::clone(&tracker));
    scheduler.schedule(Arc::clone(&handle), boss, &extra(2, 3, 10.0), SPAWN_POS);
    settle().await;

    // Wave 1 fires normally.
    tokio::time::advance(Duration::from_secs(11)).await;
    settle().await;
    assert_eq!(world.spawn_count(), 3);

    // Boss dies before wave 2's fire time.
    tracker.untrack(boss);
    tokio::time::advance(Duration::from_secs(10)).await;
    settle().await;

    // Wave 2 spawned nothing; wave 1's mobs are unaffected.
    assert_eq!(world.spawn_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn dead_boss_entity_gates_the_wave() {
    let (world, handle) = test_world();
    let tracker = Arc::new(BossTracker::new());
    let boss = track(&tracker, &handle);

    let scheduler = WaveScheduler::new(Arc::clone(&tracker));
    scheduler.schedule(Arc::clone(&handle), boss, &extra(1, 4, 5.0), SPAWN_POS);
    settle().await;

    // Still tracked (sweep hasn't run) but the entity is gone.
    world.mark_dead(boss);
    tokio::time::advance(Duration::from_secs(6)).await;
    settle().await;

    assert_eq!(world.spawn_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn wave_mobs_spawn_near_the_original_point() {
    let (world, handle) = test_world();
    let tracker = Arc::new(BossTracker::new());
    let boss = track(&tracker, &handle);

    let scheduler = WaveScheduler::new(Arc::clone(&tracker));
    scheduler.schedule(Arc::clone(&handle), boss, &extra(1, 8, 1.0), SPAWN_POS);
    settle().await;

    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    let spawned = world.spawned.lock().unwrap();
    assert_eq!(spawned.len(), 8);
    for (_, pos, _) in spawned.iter() {
        assert!((pos.x - SPAWN_POS.x).abs() <= 2.5);
        assert!((pos.z - SPAWN_POS.z).abs() <= 2.5);
        assert_eq!(pos.y, SPAWN_POS.y);
    }
}

#[tokio::test(start_paused = true)]
async fn zero_waves_schedules_nothing() {
    let (world, handle) = test_world();
    let tracker = Arc::new(BossTracker::new());
    let boss = track(&tracker, &handle);

    let scheduler = WaveScheduler::new(Arc::clone(&tracker));
    scheduler.schedule(Arc::clone(&handle), boss, &extra(0, 3, 1.0), SPAWN_POS);
    settle().await;

    tokio::time::advance(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(world.spawn_count(), 0);
}
