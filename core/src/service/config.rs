//! Service configuration
//!
//! Loaded and saved through confy under the application name.
//! Everything is tunable; the defaults match a small survival server.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;

const APP_NAME: &str = "bossforge";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory holding bosses.toml, loot_tables.toml and arenas.toml.
    pub definitions_dir: PathBuf,

    /// How long a spawned boss stays tracked before the sweep drops it.
    pub tracking_ttl_secs: u64,

    /// How often the TTL sweep runs. Tracking reads may be stale by up
    /// to this long after logical expiry.
    pub sweep_interval_secs: u64,

    /// Radius used to count participants at spawn time.
    pub player_query_radius: f64,

    /// How long a loot chest survives; re-armed on every open.
    pub chest_lifetime_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            definitions_dir: PathBuf::from("definitions"),
            tracking_ttl_secs: 3600,
            sweep_interval_secs: 60,
            player_query_radius: 40.0,
            chest_lifetime_secs: 120,
        }
    }
}

impl ServiceConfig {
    pub fn load() -> Result<Self, ConfigError> {
        confy::load(APP_NAME, None).map_err(ConfigError::Load)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self).map_err(ConfigError::Save)
    }

    pub fn tracking_ttl(&self) -> Duration {
        Duration::from_secs(self.tracking_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn chest_lifetime(&self) -> Duration {
        Duration::from_secs(self.chest_lifetime_secs)
    }
}
