//! Loot table lookup

use std::sync::{Arc, RwLock};

use hashbrown::HashMap;

use crate::definitions::LootTable;

/// Read-mostly registry of loot tables, keyed by lowercased boss name.
#[derive(Default)]
pub struct LootTableRegistry {
    tables: RwLock<HashMap<String, Arc<LootTable>>>,
}

impl LootTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a table by boss name, case-insensitively.
    pub fn get(&self, boss_name: &str) -> Option<Arc<LootTable>> {
        self.tables
            .read()
            .expect("loot table lock poisoned")
            .get(&boss_name.to_lowercase())
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.tables.read().expect("loot table lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swap in a freshly loaded table set. Used by definition reload.
    pub fn replace_all(&self, tables: Vec<LootTable>) {
        let map: HashMap<String, Arc<LootTable>> = tables
            .into_iter()
            .filter(|t| {
                if t.boss_name.trim().is_empty() {
                    tracing::warn!("skipping loot table with empty boss name");
                    false
                } else {
                    true
                }
            })
            .map(|t| (t.boss_name.to_lowercase(), Arc::new(t)))
            .collect();
        *self.tables.write().expect("loot table lock poisoned") = map;
    }
}
