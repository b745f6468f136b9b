//! Tests for spawn orchestration

use std::fs;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::{SpawnError, SpawnOrchestrator};
use crate::definitions::DefinitionRegistry;
use crate::loot::LootTableRegistry;
use crate::test_support::{settle, test_world};
use crate::tracking::BossTracker;
use crate::world::{Stat, Vec3};

const SPAWN_POS: Vec3 = Vec3::new(100.0, 64.0, 100.0);

const BOSSES: &str = r#"
[[boss]]
boss_name = "Example Boss"
entity_kind = "Bat"
amount = 3

[boss.modifiers]
hp = 2.0
damage = 1.5
size = 1.5

[boss.per_player_increase]
hp = 0.5
damage = 0.2

[[boss]]
boss_name = "Waveling"
entity_kind = "Spider"
amount = 1

[boss.extra_mobs]
entity_kind = "Spiderling"
waves = 1
mobs_per_wave = 2
wave_delay_secs = 5.0
"#;

const ARENAS: &str = r#"
[[arena]]
id = "pit"
world_id = "overworld"
boss_spawn = [10, 64, -10]
"#;

struct Fixture {
    _dir: tempfile::TempDir,
    definitions: Arc<DefinitionRegistry>,
    tracker: Arc<BossTracker>,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bosses.toml"), BOSSES).unwrap();
    fs::write(dir.path().join("arenas.toml"), ARENAS).unwrap();

    let loot = Arc::new(LootTableRegistry::new());
    let definitions = Arc::new(DefinitionRegistry::new(dir.path(), loot));
    definitions.reload().unwrap();

    Fixture {
        _dir: dir,
        definitions,
        tracker: Arc::new(BossTracker::new()),
    }
}

fn orchestrator(fx: &Fixture) -> SpawnOrchestrator {
    SpawnOrchestrator::new(
        Arc::clone(&fx.definitions),
        Arc::clone(&fx.tracker),
        Duration::from_secs(3600),
        40.0,
    )
}

#[tokio::test(start_paused = true)]
async fn unknown_boss_is_reported_not_found() {
    let (_world, handle) = test_world();
    let fx = fixture();

    let err = orchestrator(&fx)
        .spawn_boss("No Such Boss", &handle, SPAWN_POS)
        .unwrap_err();
    assert!(matches!(err, SpawnError::DefinitionNotFound { .. }));
    assert_eq!(fx.tracker.tracked_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn batch_spawns_track_only_the_primary() {
    let (world, handle) = test_world();
    let fx = fixture();

    let primary = orchestrator(&fx)
        .spawn_boss("example boss", &handle, SPAWN_POS)
        .unwrap();

    // All three units spawned, spread diagonally.
    let spawned = world.spawned.lock().unwrap().clone();
    assert_eq!(spawned.len(), 3);
    assert_eq!(spawned[0].1, SPAWN_POS);
    assert_eq!(spawned[1].1, SPAWN_POS.offset(1.2, 0.0, 1.2));
    assert_eq!(spawned[2].1, SPAWN_POS.offset(2.4, 0.0, 2.4));

    // The primary is the first unit, and the only tracked one.
    assert_eq!(primary, spawned[0].2);
    assert_eq!(fx.tracker.tracked_count(), 1);
    assert!(fx.tracker.is_tracked(primary));
}

#[tokio::test(start_paused = true)]
async fn player_count_drives_modifier_scaling() {
    let (world, handle) = test_world();
    // Two players near, one far outside the 40-unit query radius.
    world.add_player(SPAWN_POS.offset(5.0, 0.0, 0.0));
    world.add_player(SPAWN_POS.offset(-5.0, 0.0, 0.0));
    world.add_player(SPAWN_POS.offset(500.0, 0.0, 0.0));
    let fx = fixture();

    let primary = orchestrator(&fx)
        .spawn_boss("Example Boss", &handle, SPAWN_POS)
        .unwrap();

    // base 2.0 + 0.5 * (2 - 1) = 2.5
    let mods = fx.tracker.modifiers(primary).unwrap();
    assert_eq!(mods.hp_multiplier, 2.5);
    assert_eq!(mods.damage_multiplier, 1.7);

    // Every unit got hp and damage modifiers applied.
    let applied = world.applied_stats.lock().unwrap();
    let health_applies = applied.iter().filter(|(_, s, _)| *s == Stat::Health).count();
    assert_eq!(health_applies, 3);
    assert_eq!(world.applied_scales.lock().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn missing_capability_is_non_fatal() {
    let (world, handle) = test_world();
    world.stats_supported.store(false, Ordering::Relaxed);
    world.scale_supported.store(false, Ordering::Relaxed);
    let fx = fixture();

    let primary = orchestrator(&fx)
        .spawn_boss("Example Boss", &handle, SPAWN_POS)
        .unwrap();

    // Boss still spawned and tracked, just unmodified.
    assert!(fx.tracker.is_tracked(primary));
    assert_eq!(world.spawn_count(), 3);
    assert!(world.applied_stats.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn all_spawn_failures_report_none_spawned() {
    let (world, handle) = test_world();
    world.fail_spawns.store(true, Ordering::Relaxed);
    let fx = fixture();

    let err = orchestrator(&fx)
        .spawn_boss("Example Boss", &handle, SPAWN_POS)
        .unwrap_err();
    assert!(matches!(err, SpawnError::NoneSpawned { .. }));
    assert_eq!(fx.tracker.tracked_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn extra_mobs_arm_the_wave_scheduler() {
    let (world, handle) = test_world();
    let fx = fixture();

    orchestrator(&fx)
        .spawn_boss("Waveling", &handle, SPAWN_POS)
        .unwrap();
    assert_eq!(world.spawn_count(), 1);
    // Let the wave task register its deadline.
    settle().await;

    tokio::time::advance(Duration::from_secs(6)).await;
    settle().await;

    let kinds = world.spawned_kinds();
    assert_eq!(kinds.len(), 3);
    assert_eq!(kinds.iter().filter(|k| *k == "Spiderling").count(), 2);
}

#[tokio::test(start_paused = true)]
async fn arena_spawn_uses_the_anchor_and_records_the_arena() {
    let (world, handle) = test_world();
    let fx = fixture();

    let primary = orchestrator(&fx)
        .spawn_in_arena("Example Boss", "PIT", &handle)
        .unwrap();

    let data = fx.tracker.boss_data(primary).unwrap();
    assert_eq!(data.arena_id.as_deref(), Some("pit"));
    assert_eq!(data.spawn_location, Vec3::new(10.0, 64.0, -10.0));
    assert_eq!(world.spawned.lock().unwrap()[0].1, Vec3::new(10.0, 64.0, -10.0));
}

#[tokio::test(start_paused = true)]
async fn unknown_arena_is_reported() {
    let (_world, handle) = test_world();
    let fx = fixture();

    let err = orchestrator(&fx)
        .spawn_in_arena("Example Boss", "volcano", &handle)
        .unwrap_err();
    assert!(matches!(err, SpawnError::ArenaNotFound { .. }));
}
