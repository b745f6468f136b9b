//! Shared world doubles for unit tests

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use hashbrown::HashSet;
use uuid::Uuid;

use crate::world::{
    BlockPos, CapabilityMissing, ChestBlocks, EntityId, Stat, Vec3, WorldApi, WorldHandle,
};

/// In-memory world capability double.
///
/// Records every side effect so tests can assert on spawn counts, stat
/// applications and chest block lifecycle.
#[derive(Default)]
pub(crate) struct TestWorld {
    players: Mutex<Vec<(Uuid, Vec3)>>,
    next_entity: AtomicU64,
    pub spawned: Mutex<Vec<(String, Vec3, Uuid)>>,
    pub fail_spawns: AtomicBool,
    dead: Mutex<HashSet<Uuid>>,
    pub stats_supported: AtomicBool,
    pub scale_supported: AtomicBool,
    pub applied_stats: Mutex<Vec<(EntityId, Stat, f32)>>,
    pub applied_scales: Mutex<Vec<(EntityId, f32)>>,
    pub chests_placed: AtomicUsize,
    pub chests_removed: AtomicUsize,
}

impl TestWorld {
    pub fn new() -> Arc<Self> {
        let world = Self::default();
        world.stats_supported.store(true, Ordering::Relaxed);
        world.scale_supported.store(true, Ordering::Relaxed);
        Arc::new(world)
    }

    pub fn add_player(&self, position: Vec3) -> Uuid {
        let uuid = Uuid::new_v4();
        self.players.lock().unwrap().push((uuid, position));
        uuid
    }

    pub fn mark_dead(&self, entity: Uuid) {
        self.dead.lock().unwrap().insert(entity);
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().unwrap().len()
    }

    pub fn spawned_kinds(&self) -> Vec<String> {
        self.spawned
            .lock()
            .unwrap()
            .iter()
            .map(|(kind, _, _)| kind.clone())
            .collect()
    }
}

impl WorldApi for TestWorld {
    fn spawn_entity(
        &self,
        kind: &str,
        position: Vec3,
        _rotation: Vec3,
    ) -> Option<(EntityId, Uuid)> {
        if self.fail_spawns.load(Ordering::Relaxed) {
            return None;
        }
        let id = EntityId(self.next_entity.fetch_add(1, Ordering::Relaxed));
        let uuid = Uuid::new_v4();
        self.spawned
            .lock()
            .unwrap()
            .push((kind.to_string(), position, uuid));
        Some((id, uuid))
    }

    fn players_in_radius(&self, center: Vec3, radius: f64) -> Vec<(Uuid, Vec3)> {
        let radius_sq = radius * radius;
        self.players
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, pos)| pos.distance_squared(center) <= radius_sq)
            .cloned()
            .collect()
    }

    fn entity_alive_and_healthy(&self, entity: Uuid) -> bool {
        !self.dead.lock().unwrap().contains(&entity)
    }

    fn apply_stat_multiplier(
        &self,
        entity: EntityId,
        stat: Stat,
        multiplier: f32,
    ) -> Result<(), CapabilityMissing> {
        if !self.stats_supported.load(Ordering::Relaxed) {
            return Err(CapabilityMissing {
                entity,
                capability: "stat-map",
            });
        }
        self.applied_stats
            .lock()
            .unwrap()
            .push((entity, stat, multiplier));
        Ok(())
    }

    fn apply_scale_multiplier(
        &self,
        entity: EntityId,
        multiplier: f32,
    ) -> Result<(), CapabilityMissing> {
        if !self.scale_supported.load(Ordering::Relaxed) {
            return Err(CapabilityMissing {
                entity,
                capability: "scale",
            });
        }
        self.applied_scales.lock().unwrap().push((entity, multiplier));
        Ok(())
    }
}

impl ChestBlocks for TestWorld {
    fn place_chest(&self, _location: BlockPos) {
        self.chests_placed.fetch_add(1, Ordering::Relaxed);
    }

    fn remove_chest(&self, _location: BlockPos) {
        self.chests_removed.fetch_add(1, Ordering::Relaxed);
    }
}

/// A test world plus its handle with a running driver task.
pub(crate) fn test_world() -> (Arc<TestWorld>, Arc<WorldHandle>) {
    let world = TestWorld::new();
    let handle = WorldHandle::new(
        "test",
        Arc::clone(&world) as Arc<dyn WorldApi>,
        Arc::clone(&world) as Arc<dyn ChestBlocks>,
    );
    (world, handle)
}

/// Let queued timer and executor tasks run under a paused clock.
pub(crate) async fn settle() {
    // A short sleep auto-advances past pending wakeups once every other
    // task is idle.
    tokio::time::sleep(std::time::Duration::from_millis(1)).await;
}
