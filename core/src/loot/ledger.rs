//! Chest ledger: loot distribution and chest lifecycle
//!
//! One ledger per chest location, created when a tracked boss dies with
//! eligible players nearby. Each eligible player gets an independently
//! rolled loot list; claiming removes the player's entry exactly once.
//!
//! # Lifecycle
//!
//! 1. Boss death → loot rolled per eligible player → ledger stored,
//!    chest placed, expiry timer armed
//! 2. Players claim their entries (idempotent; re-arm expiry on open)
//! 3. Ledger retired by `cleanup_if_empty` once drained, or forcibly by
//!    the expiry timer → chest removed, exactly once either way

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use hashbrown::HashMap;
use rand::Rng;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::definitions::LootTable;
use crate::world::{BlockPos, Vec3, WorldHandle};

use super::LootTableRegistry;

/// How far a claim location may be from a stored ledger key and still
/// resolve to it. Absorbs multi-block chest structures and float jitter.
pub const CHEST_MATCH_RADIUS: f64 = 2.0;

/// A rolled drop: item and amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootStack {
    pub item_id: String,
    pub amount: u32,
}

/// Result of a claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// No boss chest is registered near this location. Callers treat
    /// the container as an ordinary chest.
    NotFound,
    /// The player's remaining loot. Empty when the player already
    /// claimed, or was never eligible.
    Loot(Vec<LootStack>),
}

/// Per-location loot ledgers plus their expiry timers.
pub struct ChestLedger {
    tables: Arc<LootTableRegistry>,
    chest_ttl: Duration,
    pending: DashMap<BlockPos, HashMap<Uuid, Vec<LootStack>>>,
    expiry_timers: DashMap<BlockPos, JoinHandle<()>>,
}

impl ChestLedger {
    pub fn new(tables: Arc<LootTableRegistry>, chest_ttl: Duration) -> Self {
        Self {
            tables,
            chest_ttl,
            pending: DashMap::new(),
            expiry_timers: DashMap::new(),
        }
    }

    /// Handle a tracked boss's death: roll loot for every player within
    /// the table's radius, store the ledger one block above the death
    /// location, place the chest and arm its expiry.
    ///
    /// No loot table, or nobody nearby, means no chest.
    pub fn handle_boss_death(
        self: &Arc<Self>,
        world: &Arc<WorldHandle>,
        death_location: Vec3,
        boss_name: &str,
    ) {
        let Some(table) = self.tables.get(boss_name) else {
            tracing::info!(boss = boss_name, "no loot table, skipping chest");
            return;
        };

        let eligible = world.api().players_in_radius(death_location, table.loot_radius);
        if eligible.is_empty() {
            tracing::info!(boss = boss_name, "boss died alone, no loot");
            return;
        }

        let mut per_player: HashMap<Uuid, Vec<LootStack>> = HashMap::new();
        for (player, _) in &eligible {
            per_player.insert(*player, roll_loot(&table));
        }

        // Chest sits one block above the death location.
        let key = death_location.offset(0.0, 1.0, 0.0).block_pos();
        tracing::info!(
            boss = boss_name,
            location = %key,
            players = per_player.len(),
            "boss died, storing loot ledger"
        );

        if self.pending.insert(key, per_player).is_some() {
            tracing::warn!(location = %key, "replaced an existing ledger at this location");
        }
        world.chests().place_chest(key);
        self.schedule_expiry(world, key.to_vec3(), self.chest_ttl);
    }

    /// Claim a player's loot from the chest near `location`.
    ///
    /// First claim returns the rolled list; later claims return an
    /// empty list. A location matching no ledger returns
    /// [`ClaimOutcome::NotFound`].
    pub fn claim(&self, location: Vec3, player: Uuid) -> ClaimOutcome {
        let Some(key) = self.resolve_key(location) else {
            return ClaimOutcome::NotFound;
        };
        let Some(mut entry) = self.pending.get_mut(&key) else {
            return ClaimOutcome::NotFound;
        };

        match entry.remove(&player) {
            Some(loot) => {
                tracing::info!(%player, location = %key, items = loot.len(), "loot claimed");
                ClaimOutcome::Loot(loot)
            }
            None => ClaimOutcome::Loot(Vec::new()),
        }
    }

    /// Retire the ledger near `location` if every entry has been
    /// claimed: remove it, cancel its expiry timer and remove the chest.
    /// Returns whether a ledger was retired.
    pub fn cleanup_if_empty(&self, world: &WorldHandle, location: Vec3) -> bool {
        let Some(key) = self.resolve_key(location) else {
            return false;
        };
        if self.pending.remove_if(&key, |_, loot| loot.is_empty()).is_none() {
            return false;
        }

        if let Some((_, timer)) = self.expiry_timers.remove(&key) {
            timer.abort();
        }
        tracing::info!(location = %key, "all loot claimed, removing chest");
        world.chests().remove_chest(key);
        true
    }

    /// Arm (or re-arm) the single-shot expiry timer for the ledger near
    /// `location`. Re-arming replaces the previous timer. On fire the
    /// ledger is removed unconditionally, unclaimed entries included.
    pub fn schedule_expiry(self: &Arc<Self>, world: &Arc<WorldHandle>, location: Vec3, ttl: Duration) {
        let Some(key) = self.resolve_key(location) else {
            return;
        };

        let ledger = Arc::clone(self);
        let world = Arc::clone(world);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            ledger.expire(&world, key);
        });

        if let Some(prev) = self.expiry_timers.insert(key, handle) {
            prev.abort();
        }
    }

    /// Number of live ledgers, for diagnostics.
    pub fn active_ledgers(&self) -> usize {
        self.pending.len()
    }

    fn expire(&self, world: &WorldHandle, key: BlockPos) {
        self.expiry_timers.remove(&key);
        let Some((_, remaining)) = self.pending.remove(&key) else {
            return;
        };
        tracing::info!(
            location = %key,
            unclaimed = remaining.len(),
            "chest expired, removing"
        );
        let world_name = world.name().to_string();
        world.execute(move |_api, chests| {
            tracing::debug!(world = %world_name, location = %key, "removing expired chest");
            chests.remove_chest(key);
        });
    }

    /// Find the ledger key within [`CHEST_MATCH_RADIUS`] of `location`.
    fn resolve_key(&self, location: Vec3) -> Option<BlockPos> {
        let tolerance_sq = CHEST_MATCH_RADIUS * CHEST_MATCH_RADIUS;
        self.pending
            .iter()
            .map(|entry| *entry.key())
            .find(|key| key.to_vec3().distance_squared(location) <= tolerance_sq)
    }
}

fn roll_loot(table: &LootTable) -> Vec<LootStack> {
    let mut rng = rand::rng();
    let mut loot = Vec::new();

    for item in &table.items {
        if rng.random::<f64>() > item.drop_chance {
            continue;
        }
        let amount = if item.max_amount > item.min_amount {
            rng.random_range(item.min_amount..=item.max_amount)
        } else {
            item.min_amount
        };
        loot.push(LootStack {
            item_id: item.item_id.clone(),
            amount,
        });
    }

    loot
}
