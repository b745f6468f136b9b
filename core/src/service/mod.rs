//! Service composition root
//!
//! `EncounterService` wires the definition registry, boss tracker,
//! chest ledger and spawn orchestrator together and owns the background
//! tasks (TTL sweep, definition watcher). Host integrations call the
//! entry points here: spawn, boss death, chest open/close, reload.

mod background_tasks;
mod config;
mod error;
pub mod watcher;

pub use background_tasks::BackgroundTasks;
pub use config::ServiceConfig;
pub use error::{ConfigError, WatcherError};

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::definitions::{self, DefinitionError, DefinitionRegistry, ReloadSummary};
use crate::loot::{ChestLedger, ClaimOutcome, LootTableRegistry};
use crate::orchestrator::{SpawnError, SpawnOrchestrator};
use crate::tracking::{self, BossTracker};
use crate::world::{Vec3, WorldHandle};
use watcher::{DefinitionsEvent, DefinitionsWatcher};

pub struct EncounterService {
    config: ServiceConfig,
    definitions: Arc<DefinitionRegistry>,
    tracker: Arc<BossTracker>,
    ledger: Arc<ChestLedger>,
    orchestrator: SpawnOrchestrator,
    pub tasks: Mutex<BackgroundTasks>,
}

impl EncounterService {
    pub fn new(config: ServiceConfig) -> Self {
        let loot_tables = Arc::new(LootTableRegistry::new());
        let definitions = Arc::new(DefinitionRegistry::new(
            config.definitions_dir.clone(),
            Arc::clone(&loot_tables),
        ));
        let tracker = Arc::new(BossTracker::new());
        let ledger = Arc::new(ChestLedger::new(loot_tables, config.chest_lifetime()));
        let orchestrator = SpawnOrchestrator::new(
            Arc::clone(&definitions),
            Arc::clone(&tracker),
            config.tracking_ttl(),
            config.player_query_radius,
        );

        Self {
            config,
            definitions,
            tracker,
            ledger,
            orchestrator,
            tasks: Mutex::new(BackgroundTasks::default()),
        }
    }

    pub fn definitions(&self) -> &Arc<DefinitionRegistry> {
        &self.definitions
    }

    pub fn tracker(&self) -> &Arc<BossTracker> {
        &self.tracker
    }

    pub fn ledger(&self) -> &Arc<ChestLedger> {
        &self.ledger
    }

    /// Write starter definition files if none exist, then load.
    pub fn init_definitions(&self) -> Result<ReloadSummary, DefinitionError> {
        definitions::write_defaults(&self.config.definitions_dir)?;
        self.definitions.reload()
    }

    /// Start the background tasks: the tracking TTL sweep and the
    /// definition directory watcher.
    pub async fn start(&self) {
        let mut tasks = self.tasks.lock().await;

        tasks.sweep = Some(tracking::spawn_sweep_task(
            Arc::clone(&self.tracker),
            self.config.sweep_interval(),
        ));

        match DefinitionsWatcher::new(&self.config.definitions_dir) {
            Ok(watcher) => {
                tasks.watcher = Some(spawn_watcher_task(watcher, Arc::clone(&self.definitions)));
            }
            Err(err) => {
                tracing::warn!(%err, "definition watcher unavailable, reload is manual only");
            }
        }
    }

    pub async fn shutdown(&self) {
        self.tasks.lock().await.abort_all().await;
    }

    pub fn spawn_boss(
        &self,
        boss_id: &str,
        world: &Arc<WorldHandle>,
        position: Vec3,
    ) -> Result<Uuid, SpawnError> {
        self.orchestrator.spawn_boss(boss_id, world, position)
    }

    pub fn spawn_in_arena(
        &self,
        boss_id: &str,
        arena_id: &str,
        world: &Arc<WorldHandle>,
    ) -> Result<Uuid, SpawnError> {
        self.orchestrator.spawn_in_arena(boss_id, arena_id, world)
    }

    /// Death entry point. A tracked uuid hands loot off to the ledger
    /// at the boss's recorded spawn location, then leaves tracking.
    /// Unknown uuids are ignored; ordinary mob deaths land here too.
    ///
    /// Returns whether the death belonged to a tracked boss.
    pub fn handle_boss_death(&self, uuid: Uuid) -> bool {
        let Some(data) = self.tracker.boss_data(uuid) else {
            return false;
        };

        tracing::info!(%uuid, boss = %data.boss_name, "tracked boss died");
        self.ledger
            .handle_boss_death(&data.world, data.spawn_location, &data.boss_name);
        self.tracker.untrack(uuid);
        true
    }

    /// Chest-open entry point. A hit re-arms the chest's expiry so an
    /// actively looted chest is not pulled out from under its players.
    pub fn open_chest(
        &self,
        world: &Arc<WorldHandle>,
        location: Vec3,
        player: Uuid,
    ) -> ClaimOutcome {
        let outcome = self.ledger.claim(location, player);
        if let ClaimOutcome::Loot(_) = &outcome {
            self.ledger
                .schedule_expiry(world, location, self.config.chest_lifetime());
        }
        outcome
    }

    /// Chest-close entry point: retire the ledger if fully claimed.
    pub fn chest_closed(&self, world: &WorldHandle, location: Vec3) -> bool {
        self.ledger.cleanup_if_empty(world, location)
    }

    pub async fn reload_definitions(&self) -> Result<ReloadSummary, DefinitionError> {
        let definitions = Arc::clone(&self.definitions);
        match tokio::task::spawn_blocking(move || definitions.reload()).await {
            Ok(result) => result,
            Err(err) => Err(DefinitionError::Invalid {
                path: self.config.definitions_dir.clone(),
                reason: format!("reload task failed: {err}"),
            }),
        }
    }
}

fn spawn_watcher_task(
    mut watcher: DefinitionsWatcher,
    definitions: Arc<DefinitionRegistry>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            match event {
                DefinitionsEvent::FileChanged(path) => {
                    tracing::info!(path = %path.display(), "definition file changed, reloading");
                    let definitions = Arc::clone(&definitions);
                    let result =
                        tokio::task::spawn_blocking(move || definitions.reload()).await;
                    match result {
                        Ok(Ok(summary)) => tracing::info!(
                            bosses = summary.bosses,
                            loot_tables = summary.loot_tables,
                            arenas = summary.arenas,
                            "definitions reloaded from watcher"
                        ),
                        Ok(Err(err)) => {
                            tracing::warn!(%err, "reload failed, keeping previous definitions");
                        }
                        Err(err) => tracing::warn!(%err, "reload task failed"),
                    }
                }
                DefinitionsEvent::Error(msg) => tracing::warn!(%msg, "definition watcher error"),
            }
        }
    })
}
