//! Tests for definition loading and reload semantics

use std::fs;
use std::sync::Arc;

use super::DefinitionRegistry;
use crate::loot::LootTableRegistry;

const GOOD_BOSSES: &str = r#"
[[boss]]
boss_name = "Example Boss"
entity_kind = "Bat"
amount = 2

[boss.modifiers]
hp = 2.0
damage = 1.5

[boss.per_player_increase]
hp = 0.5

[boss.extra_mobs]
entity_kind = "Bat"
waves = 2
mobs_per_wave = 5
wave_delay_secs = 30.0
"#;

const GOOD_LOOT: &str = r#"
[[table]]
boss_name = "Example Boss"
loot_radius = 40.0

[[table.item]]
item_id = "Diamond"
drop_chance = 1.0
min_amount = 3
max_amount = 7
"#;

fn registry_in(dir: &std::path::Path) -> (DefinitionRegistry, Arc<LootTableRegistry>) {
    let loot = Arc::new(LootTableRegistry::new());
    (DefinitionRegistry::new(dir, Arc::clone(&loot)), loot)
}

#[test]
fn reload_loads_all_definition_kinds() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bosses.toml"), GOOD_BOSSES).unwrap();
    fs::write(dir.path().join("loot_tables.toml"), GOOD_LOOT).unwrap();

    let (registry, loot) = registry_in(dir.path());
    let summary = registry.reload().unwrap();

    assert_eq!(summary.bosses, 1);
    assert_eq!(summary.loot_tables, 1);
    assert_eq!(summary.arenas, 0);

    let boss = registry.boss("example boss").expect("case-insensitive hit");
    assert_eq!(boss.entity_kind, "Bat");
    assert_eq!(boss.amount, 2);
    let extra = boss.extra_mobs.as_ref().unwrap();
    assert_eq!(extra.waves, 2);
    assert_eq!(extra.mobs_per_wave, 5);

    assert!(loot.get("EXAMPLE BOSS").is_some());
}

#[test]
fn missing_files_load_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (registry, loot) = registry_in(dir.path());

    let summary = registry.reload().unwrap();
    assert_eq!(summary.bosses, 0);
    assert_eq!(loot.len(), 0);
}

#[test]
fn failed_reload_keeps_previous_definitions() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bosses.toml"), GOOD_BOSSES).unwrap();
    fs::write(dir.path().join("loot_tables.toml"), GOOD_LOOT).unwrap();

    let (registry, loot) = registry_in(dir.path());
    registry.reload().unwrap();
    assert_eq!(registry.boss_count(), 1);

    // Corrupt the boss file and reload again.
    fs::write(dir.path().join("bosses.toml"), "[[boss]]\nnot toml =").unwrap();
    let err = registry.reload().unwrap_err();
    assert!(err.to_string().contains("parse"));

    // Live registry is untouched.
    assert_eq!(registry.boss_count(), 1);
    assert!(registry.boss("Example Boss").is_some());
    assert_eq!(loot.len(), 1);
}

#[test]
fn invalid_drop_chance_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bad = GOOD_LOOT.replace("drop_chance = 1.0", "drop_chance = 1.5");
    fs::write(dir.path().join("loot_tables.toml"), bad).unwrap();

    let (registry, _loot) = registry_in(dir.path());
    let err = registry.reload().unwrap_err();
    assert!(err.to_string().contains("invalid definition"));
}

#[test]
fn zero_amount_boss_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bad = GOOD_BOSSES.replace("amount = 2", "amount = 0");
    fs::write(dir.path().join("bosses.toml"), bad).unwrap();

    let (registry, _loot) = registry_in(dir.path());
    assert!(registry.reload().is_err());
}

#[test]
fn non_finite_wave_delay_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bad = GOOD_BOSSES.replace("wave_delay_secs = 30.0", "wave_delay_secs = inf");
    fs::write(dir.path().join("bosses.toml"), bad).unwrap();

    let (registry, _loot) = registry_in(dir.path());
    let err = registry.reload().unwrap_err();
    assert!(err.to_string().contains("invalid definition"));
}

#[test]
fn negative_wave_delay_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bad = GOOD_BOSSES.replace("wave_delay_secs = 30.0", "wave_delay_secs = -1.0");
    fs::write(dir.path().join("bosses.toml"), bad).unwrap();

    let (registry, _loot) = registry_in(dir.path());
    assert!(registry.reload().is_err());
}

#[test]
fn write_defaults_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    super::loader::write_defaults(dir.path()).unwrap();

    let (registry, loot) = registry_in(dir.path());
    let summary = registry.reload().unwrap();
    assert_eq!(summary.bosses, 1);
    assert_eq!(summary.loot_tables, 1);
    assert!(registry.boss("Example Boss").is_some());
    assert_eq!(loot.get("example boss").unwrap().items.len(), 4);
}
