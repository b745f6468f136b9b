use std::io::Write;

use bossforge_core::loot::ClaimOutcome;
use bossforge_core::world::Vec3;
use uuid::Uuid;

use crate::CliContext;

pub fn spawn(ctx: &CliContext, boss: &str, position: Vec3, arena: Option<&str>) {
    let result = match arena {
        Some(arena_id) => ctx.service.spawn_in_arena(boss, arena_id, &ctx.world),
        None => ctx.service.spawn_boss(boss, &ctx.world, position),
    };

    match result {
        Ok(uuid) => println!("spawned '{}' as {}", boss, uuid),
        Err(err) => println!("spawn failed: {}", err),
    }
}

pub fn kill(ctx: &CliContext, uuid_str: &str) {
    let uuid = match Uuid::parse_str(uuid_str) {
        Ok(uuid) => uuid,
        Err(err) => {
            println!("invalid uuid '{}': {}", uuid_str, err);
            return;
        }
    };

    // Dead in the world first so pending waves see it gone.
    ctx.sim.mark_dead(uuid);
    if ctx.service.handle_boss_death(uuid) {
        println!("boss {} died", uuid);
    } else {
        println!("{} is not a tracked boss", uuid);
    }
}

pub fn open(ctx: &CliContext, position: Vec3, player: &str) {
    let Some(player_uuid) = ctx.sim.player(player) else {
        println!(
            "unknown player '{}' (known: {})",
            player,
            ctx.sim.player_names().join(", ")
        );
        return;
    };

    match ctx.service.open_chest(&ctx.world, position, player_uuid) {
        ClaimOutcome::NotFound => println!("no boss chest at {}", position),
        ClaimOutcome::Loot(loot) if loot.is_empty() => {
            println!("{} has no loot left here", player);
        }
        ClaimOutcome::Loot(loot) => {
            println!("{} claims:", player);
            for stack in loot {
                println!("  {} x{}", stack.item_id, stack.amount);
            }
        }
    }
}

pub fn close(ctx: &CliContext, position: Vec3) {
    if ctx.service.chest_closed(&ctx.world, position) {
        println!("chest at {} fully claimed and removed", position);
    } else {
        println!("chest at {} still has unclaimed loot", position);
    }
}

pub fn bosses(ctx: &CliContext) {
    let names = ctx.service.definitions().boss_names();
    if names.is_empty() {
        println!("no boss definitions loaded");
        return;
    }
    for name in names {
        println!("{}", name);
    }
}

pub fn tracked(ctx: &CliContext) {
    let bosses = ctx.service.tracker().tracked_bosses();
    if bosses.is_empty() {
        println!("no bosses tracked");
        return;
    }
    for (uuid, name) in bosses {
        println!("{}  {}", uuid, name);
    }
    println!(
        "\n{} tracked, {} active chest(s)",
        ctx.service.tracker().tracked_count(),
        ctx.service.ledger().active_ledgers()
    );
}

pub async fn reload(ctx: &CliContext) {
    match ctx.service.reload_definitions().await {
        Ok(summary) => println!(
            "reloaded: {} bosses, {} loot tables, {} arenas",
            summary.bosses, summary.loot_tables, summary.arenas
        ),
        Err(err) => println!("reload failed: {}", err),
    }
}

pub fn set_players(ctx: &CliContext, count: usize, center: Vec3) {
    ctx.sim.set_players(count, center);
    println!(
        "{} player(s) around {}: {}",
        count,
        center,
        ctx.sim.player_names().join(", ")
    );
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").ok();
    std::io::stdout().flush().ok();
}
