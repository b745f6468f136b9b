//! Definition file loading and validation
//!
//! Each definition kind lives in its own TOML file inside the
//! definitions directory:
//!
//! - `bosses.toml`: `[[boss]]` entries
//! - `loot_tables.toml`: `[[table]]` entries with nested `[[table.item]]`
//! - `arenas.toml`: `[[arena]]` entries
//!
//! A missing file loads as empty; an unreadable or malformed file is an
//! error so the caller can refuse the whole reload.

use std::fs;
use std::path::Path;

use super::{ArenaDef, ArenaFile, BossDefinition, BossFile, DefinitionError, LootFile, LootTable};

pub const BOSSES_FILE: &str = "bosses.toml";
pub const LOOT_TABLES_FILE: &str = "loot_tables.toml";
pub const ARENAS_FILE: &str = "arenas.toml";

/// Upper bound on the configurable wave delay. TOML accepts `inf` and
/// `nan`, which would panic in `Duration::from_secs_f64` downstream.
const MAX_WAVE_DELAY_SECS: f64 = 86_400.0;

/// Load boss definitions from `bosses.toml` under `dir`.
pub fn load_bosses(dir: &Path) -> Result<Vec<BossDefinition>, DefinitionError> {
    let path = dir.join(BOSSES_FILE);
    let Some(content) = read_optional(&path)? else {
        return Ok(Vec::new());
    };

    let file: BossFile = parse(&path, &content)?;
    for boss in &file.bosses {
        validate_boss(&path, boss)?;
    }
    Ok(file.bosses)
}

/// Load loot tables from `loot_tables.toml` under `dir`.
pub fn load_loot_tables(dir: &Path) -> Result<Vec<LootTable>, DefinitionError> {
    let path = dir.join(LOOT_TABLES_FILE);
    let Some(content) = read_optional(&path)? else {
        return Ok(Vec::new());
    };

    let file: LootFile = parse(&path, &content)?;
    for table in &file.tables {
        validate_loot_table(&path, table)?;
    }
    Ok(file.tables)
}

/// Load arena definitions from `arenas.toml` under `dir`.
pub fn load_arenas(dir: &Path) -> Result<Vec<ArenaDef>, DefinitionError> {
    let path = dir.join(ARENAS_FILE);
    let Some(content) = read_optional(&path)? else {
        return Ok(Vec::new());
    };

    let file: ArenaFile = parse(&path, &content)?;
    for arena in &file.arenas {
        if arena.id.trim().is_empty() {
            return Err(DefinitionError::Invalid {
                path: path.clone(),
                reason: "arena with empty id".into(),
            });
        }
    }
    Ok(file.arenas)
}

/// Write starter `bosses.toml` and `loot_tables.toml` files if the
/// directory has neither. Gives server admins something to edit.
pub fn write_defaults(dir: &Path) -> Result<(), DefinitionError> {
    let bosses_path = dir.join(BOSSES_FILE);
    let loot_path = dir.join(LOOT_TABLES_FILE);
    if bosses_path.exists() || loot_path.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| DefinitionError::WriteFile {
        path: dir.to_path_buf(),
        source,
    })?;

    write_toml(&bosses_path, &default_bosses())?;
    write_toml(&loot_path, &default_loot_tables())?;
    tracing::info!(dir = %dir.display(), "wrote default definition files");
    Ok(())
}

fn read_optional(path: &Path) -> Result<Option<String>, DefinitionError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "definition file missing, loading empty");
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| DefinitionError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, content: &str) -> Result<T, DefinitionError> {
    toml::from_str(content).map_err(|source| DefinitionError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn write_toml<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), DefinitionError> {
    let rendered = toml::to_string_pretty(value).map_err(|e| DefinitionError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, rendered).map_err(|source| DefinitionError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_boss(path: &Path, boss: &BossDefinition) -> Result<(), DefinitionError> {
    if boss.boss_name.trim().is_empty() {
        return Err(DefinitionError::Invalid {
            path: path.to_path_buf(),
            reason: "boss with empty boss_name".into(),
        });
    }
    if boss.entity_kind.trim().is_empty() {
        return Err(DefinitionError::Invalid {
            path: path.to_path_buf(),
            reason: format!("boss '{}' has empty entity_kind", boss.boss_name),
        });
    }
    if boss.amount == 0 {
        return Err(DefinitionError::Invalid {
            path: path.to_path_buf(),
            reason: format!("boss '{}' has amount 0", boss.boss_name),
        });
    }
    if let Some(extra) = &boss.extra_mobs {
        if extra.waves > 0 && extra.entity_kind.trim().is_empty() {
            return Err(DefinitionError::Invalid {
                path: path.to_path_buf(),
                reason: format!("boss '{}' has waves but no wave entity_kind", boss.boss_name),
            });
        }
        // Rejects nan and inf too; both fail the range check.
        if !(0.0..=MAX_WAVE_DELAY_SECS).contains(&extra.wave_delay_secs) {
            return Err(DefinitionError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "boss '{}' has wave_delay_secs {} outside [0, {}]",
                    boss.boss_name, extra.wave_delay_secs, MAX_WAVE_DELAY_SECS
                ),
            });
        }
    }
    Ok(())
}

fn validate_loot_table(path: &Path, table: &LootTable) -> Result<(), DefinitionError> {
    if table.boss_name.trim().is_empty() {
        return Err(DefinitionError::Invalid {
            path: path.to_path_buf(),
            reason: "loot table with empty boss_name".into(),
        });
    }
    for item in &table.items {
        if !(0.0..=1.0).contains(&item.drop_chance) {
            return Err(DefinitionError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "loot table '{}': item '{}' drop_chance {} outside [0, 1]",
                    table.boss_name, item.item_id, item.drop_chance
                ),
            });
        }
        if item.min_amount > item.max_amount {
            return Err(DefinitionError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "loot table '{}': item '{}' min_amount > max_amount",
                    table.boss_name, item.item_id
                ),
            });
        }
    }
    Ok(())
}

fn default_bosses() -> BossFile {
    use super::{ExtraMobs, Modifiers, PerPlayerIncrease};

    BossFile {
        bosses: vec![BossDefinition {
            boss_name: "Example Boss".into(),
            entity_kind: "Bat".into(),
            amount: 1,
            modifiers: Modifiers {
                hp: 2.0,
                damage: 1.5,
                size: 1.0,
            },
            per_player_increase: PerPlayerIncrease {
                hp: 0.5,
                damage: 0.2,
                size: 0.0,
            },
            extra_mobs: Some(ExtraMobs {
                entity_kind: "Bat".into(),
                waves: 2,
                mobs_per_wave: 5,
                wave_delay_secs: 30.0,
            }),
        }],
    }
}

fn default_loot_tables() -> LootFile {
    use super::LootItem;

    let item = |item_id: &str, drop_chance: f64, min_amount: u32, max_amount: u32| LootItem {
        item_id: item_id.into(),
        drop_chance,
        min_amount,
        max_amount,
    };

    LootFile {
        tables: vec![LootTable {
            boss_name: "Example Boss".into(),
            loot_radius: 40.0,
            items: vec![
                item("Diamond", 1.0, 3, 7),
                item("Gold_Ingot", 0.8, 5, 10),
                item("Emerald", 0.5, 1, 3),
                item("Iron_Ingot", 1.0, 10, 20),
            ],
        }],
    }
}
