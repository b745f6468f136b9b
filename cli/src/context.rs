use std::sync::Arc;

use bossforge_core::service::{EncounterService, ServiceConfig};
use bossforge_core::world::{ChestBlocks, WorldApi, WorldHandle};

use crate::sim::SimWorld;

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the service.
#[derive(Clone)]
pub struct CliContext {
    pub service: Arc<EncounterService>,
    pub sim: Arc<SimWorld>,
    pub world: Arc<WorldHandle>,
}

impl CliContext {
    /// Must be called from within a tokio runtime (the world handle
    /// starts its driver task).
    pub fn new() -> Self {
        let config = ServiceConfig::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load config, using defaults");
            ServiceConfig::default()
        });

        let sim = Arc::new(SimWorld::new());
        let world = WorldHandle::new(
            "sim",
            Arc::clone(&sim) as Arc<dyn WorldApi>,
            Arc::clone(&sim) as Arc<dyn ChestBlocks>,
        );

        Self {
            service: Arc::new(EncounterService::new(config)),
            sim,
            world,
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
