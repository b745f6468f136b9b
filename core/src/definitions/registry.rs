//! Live definition registry
//!
//! Read-mostly lookup for boss and arena definitions, plus the reload
//! entry point. A reload parses the complete new definition set before
//! anything is swapped in, so a failed reload leaves the live registry
//! untouched.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use hashbrown::HashMap;

use super::{ArenaDef, BossDefinition, DefinitionError, loader};
use crate::loot::LootTableRegistry;

/// Counts reported by a successful reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    pub bosses: usize,
    pub loot_tables: usize,
    pub arenas: usize,
}

/// Boss and arena lookup, keyed case-insensitively.
///
/// Loot tables loaded alongside are installed into the shared
/// [`LootTableRegistry`] in the same reload.
pub struct DefinitionRegistry {
    dir: PathBuf,
    loot_tables: Arc<LootTableRegistry>,
    bosses: RwLock<HashMap<String, Arc<BossDefinition>>>,
    arenas: RwLock<HashMap<String, Arc<ArenaDef>>>,
}

impl DefinitionRegistry {
    pub fn new(dir: impl Into<PathBuf>, loot_tables: Arc<LootTableRegistry>) -> Self {
        Self {
            dir: dir.into(),
            loot_tables,
            bosses: RwLock::new(HashMap::new()),
            arenas: RwLock::new(HashMap::new()),
        }
    }

    pub fn definitions_dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Look up a boss definition by name, case-insensitively.
    pub fn boss(&self, boss_id: &str) -> Option<Arc<BossDefinition>> {
        self.bosses
            .read()
            .expect("boss registry lock poisoned")
            .get(&boss_id.to_lowercase())
            .cloned()
    }

    /// Look up an arena by id, case-insensitively.
    pub fn arena(&self, arena_id: &str) -> Option<Arc<ArenaDef>> {
        self.arenas
            .read()
            .expect("arena registry lock poisoned")
            .get(&arena_id.to_lowercase())
            .cloned()
    }

    pub fn boss_count(&self) -> usize {
        self.bosses.read().expect("boss registry lock poisoned").len()
    }

    /// Boss names currently registered, for command listings.
    pub fn boss_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .bosses
            .read()
            .expect("boss registry lock poisoned")
            .values()
            .map(|b| b.boss_name.clone())
            .collect();
        names.sort();
        names
    }

    /// Reload every definition file from the registry's directory.
    ///
    /// All files are parsed and validated first; the live maps are only
    /// replaced once the whole set is good.
    pub fn reload(&self) -> Result<ReloadSummary, DefinitionError> {
        let bosses = loader::load_bosses(&self.dir)?;
        let loot_tables = loader::load_loot_tables(&self.dir)?;
        let arenas = loader::load_arenas(&self.dir)?;

        let summary = ReloadSummary {
            bosses: bosses.len(),
            loot_tables: loot_tables.len(),
            arenas: arenas.len(),
        };

        let boss_map: HashMap<String, Arc<BossDefinition>> = bosses
            .into_iter()
            .map(|b| (b.boss_name.to_lowercase(), Arc::new(b)))
            .collect();
        let arena_map: HashMap<String, Arc<ArenaDef>> = arenas
            .into_iter()
            .map(|a| (a.id.to_lowercase(), Arc::new(a)))
            .collect();

        *self.bosses.write().expect("boss registry lock poisoned") = boss_map;
        *self.arenas.write().expect("arena registry lock poisoned") = arena_map;
        self.loot_tables.replace_all(loot_tables);

        tracing::info!(
            bosses = summary.bosses,
            loot_tables = summary.loot_tables,
            arenas = summary.arenas,
            "definitions reloaded"
        );
        Ok(summary)
    }
}
