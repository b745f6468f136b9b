//! Live boss tracking
//!
//! Concurrent registry of spawned bosses with a bounded lifetime.
//! Entries are removed explicitly on death, or by the periodic TTL
//! sweep. Expiry is deliberately not checked on read: `is_tracked` may
//! report true for up to one sweep interval after logical expiry, which
//! downstream consumers (wave gating) accept.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::scaling::BossModifiers;
use crate::world::{Vec3, WorldHandle};


/// Everything recorded about a live boss at spawn time.
#[derive(Debug, Clone)]
pub struct BossData {
    pub boss_name: String,
    pub modifiers: BossModifiers,
    pub arena_id: Option<String>,
    pub world: Arc<WorldHandle>,
    pub spawn_location: Vec3,
}

struct TrackedBoss {
    data: BossData,
    expire_at: Instant,
}

/// Concurrent registry of live tracked bosses.
///
/// All operations are single-entry map operations; there are no
/// cross-entry invariants to hold transactionally.
#[derive(Default)]
pub struct BossTracker {
    tracked: DashMap<Uuid, TrackedBoss>,
}

impl BossTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a boss for `ttl`. Re-tracking an existing uuid replaces
    /// the entry and advances its expiry.
    pub fn track(&self, uuid: Uuid, data: BossData, ttl: Duration) {
        let expire_at = Instant::now() + ttl;
        tracing::info!(%uuid, boss = %data.boss_name, ttl_secs = ttl.as_secs(), "boss tracked");
        self.tracked.insert(uuid, TrackedBoss { data, expire_at });
    }

    /// Remove a boss from tracking. Returns whether it was present.
    pub fn untrack(&self, uuid: Uuid) -> bool {
        let removed = self.tracked.remove(&uuid).is_some();
        if removed {
            tracing::info!(%uuid, "boss untracked");
        }
        removed
    }

    pub fn is_tracked(&self, uuid: Uuid) -> bool {
        self.tracked.contains_key(&uuid)
    }

    pub fn modifiers(&self, uuid: Uuid) -> Option<BossModifiers> {
        self.tracked.get(&uuid).map(|b| b.data.modifiers)
    }

    /// Cloned snapshot of the boss's spawn record.
    pub fn boss_data(&self, uuid: Uuid) -> Option<BossData> {
        self.tracked.get(&uuid).map(|b| b.data.clone())
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Uuid and name of every tracked boss, for command listings.
    pub fn tracked_bosses(&self) -> Vec<(Uuid, String)> {
        self.tracked
            .iter()
            .map(|entry| (*entry.key(), entry.value().data.boss_name.clone()))
            .collect()
    }

    /// Drop every entry whose TTL has passed. Returns how many were
    /// removed. Invoked by the periodic sweep task, never lazily.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.tracked.len();
        self.tracked.retain(|_, boss| boss.expire_at > now);
        let removed = before.saturating_sub(self.tracked.len());
        if removed > 0 {
            tracing::debug!(removed, "expired bosses swept");
        }
        removed
    }
}

/// Start the periodic TTL sweep for a tracker.
pub fn spawn_sweep_task(tracker: Arc<BossTracker>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            tracker.cleanup_expired();
        }
    })
}
