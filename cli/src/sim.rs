//! In-process world double for the demo REPL
//!
//! Implements the core world traits against plain in-memory state so
//! the whole encounter flow can be driven from a terminal: scripted
//! players, counted spawns, chest blocks printed instead of placed.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use bossforge_core::world::{
    BlockPos, CapabilityMissing, ChestBlocks, EntityId, Stat, Vec3, WorldApi,
};
use hashbrown::HashSet;
use uuid::Uuid;

#[derive(Default)]
pub struct SimWorld {
    players: Mutex<Vec<(String, Uuid, Vec3)>>,
    next_entity: AtomicU64,
    dead: Mutex<HashSet<Uuid>>,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the player roster with `count` players named
    /// `player-1..count`, spread around `center`.
    pub fn set_players(&self, count: usize, center: Vec3) {
        let mut players = self.players.lock().unwrap();
        players.clear();
        for i in 0..count {
            let name = format!("player-{}", i + 1);
            let pos = center.offset(i as f64 * 2.0, 0.0, 0.0);
            players.push((name, Uuid::new_v4(), pos));
        }
    }

    /// Resolve a scripted player by name.
    pub fn player(&self, name: &str) -> Option<Uuid> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, uuid, _)| *uuid)
    }

    pub fn player_names(&self) -> Vec<String> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .map(|(n, _, _)| n.clone())
            .collect()
    }

    pub fn mark_dead(&self, entity: Uuid) {
        self.dead.lock().unwrap().insert(entity);
    }
}

impl WorldApi for SimWorld {
    fn spawn_entity(
        &self,
        kind: &str,
        position: Vec3,
        _rotation: Vec3,
    ) -> Option<(EntityId, Uuid)> {
        let id = EntityId(self.next_entity.fetch_add(1, Ordering::Relaxed));
        let uuid = Uuid::new_v4();
        println!("[world] spawned {} {} at {} ({})", kind, id, position, uuid);
        Some((id, uuid))
    }

    fn players_in_radius(&self, center: Vec3, radius: f64) -> Vec<(Uuid, Vec3)> {
        let radius_sq = radius * radius;
        self.players
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, pos)| pos.distance_squared(center) <= radius_sq)
            .map(|(_, uuid, pos)| (*uuid, *pos))
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
        println!("[world] {} {} x{:.2}", entity, stat, multiplier);
        Ok(())
    }

    fn apply_scale_multiplier(
        &self,
        entity: EntityId,
        multiplier: f32,
    ) -> Result<(), CapabilityMissing> {
        println!("[world] {} scale x{:.2}", entity, multiplier);
        Ok(())
    }
}

impl ChestBlocks for SimWorld {
    fn place_chest(&self, location: BlockPos) {
        println!("[world] chest placed at {}", location);
    }

    fn remove_chest(&self, location: BlockPos) {
        println!("[world] chest removed at {}", location);
    }
}
