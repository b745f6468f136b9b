pub mod definitions;
pub mod loot;
pub mod orchestrator;
pub mod scaling;
pub mod service;
pub mod tracking;
pub mod waves;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use definitions::{
    ArenaDef, BossDefinition, DefinitionError, DefinitionRegistry, ExtraMobs, LootItem, LootTable,
    ReloadSummary, write_defaults,
};
pub use loot::{ChestLedger, ClaimOutcome, LootStack, LootTableRegistry};
pub use orchestrator::{SpawnError, SpawnOrchestrator};
pub use scaling::{BossModifiers, scaled_modifiers};
pub use service::{BackgroundTasks, EncounterService, ServiceConfig};
pub use tracking::{BossData, BossTracker, spawn_sweep_task};
pub use waves::WaveScheduler;
pub use world::{
    BlockPos, CapabilityMissing, ChestBlocks, EntityId, Stat, Vec3, WorldApi, WorldHandle,
};
