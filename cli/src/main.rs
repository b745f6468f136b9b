use bossforge_cli::CliContext;
use bossforge_cli::commands;
use bossforge_cli::readline;
use bossforge_core::world::Vec3;
use clap::{Parser, Subcommand};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bossforge_core=info,bossforge_cli=info".into()),
        )
        .init();

    let ctx = CliContext::new();

    match ctx.service.init_definitions() {
        Ok(summary) => println!(
            "loaded {} bosses, {} loot tables, {} arenas",
            summary.bosses, summary.loot_tables, summary.arenas
        ),
        Err(err) => println!("failed to load definitions: {}", err),
    }
    ctx.service.start().await;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.service.shutdown().await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "boss encounter cli")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn a boss at a position or in a configured arena
    Spawn {
        #[arg(short, long)]
        boss: String,
        #[arg(short, long)]
        arena: Option<String>,
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,
        #[arg(short, long, default_value_t = 64.0)]
        y: f64,
        #[arg(short, long, default_value_t = 0.0)]
        z: f64,
    },
    /// Report a boss death by uuid
    Kill {
        #[arg(short, long)]
        uuid: String,
    },
    /// Open the chest near a position as a player
    Open {
        #[arg(short, long)]
        player: String,
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,
        #[arg(short, long, default_value_t = 65.0)]
        y: f64,
        #[arg(short, long, default_value_t = 0.0)]
        z: f64,
    },
    /// Close the chest near a position
    Close {
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,
        #[arg(short, long, default_value_t = 65.0)]
        y: f64,
        #[arg(short, long, default_value_t = 0.0)]
        z: f64,
    },
    /// List loaded boss definitions
    Bosses,
    /// List tracked bosses and active chests
    Tracked,
    /// Reload definition files
    Reload,
    /// Script the player roster around a position
    SetPlayers {
        #[arg(short, long)]
        count: usize,
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,
        #[arg(short, long, default_value_t = 64.0)]
        y: f64,
        #[arg(short, long, default_value_t = 0.0)]
        z: f64,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "bossforge".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Spawn { boss, arena, x, y, z }) => {
            commands::spawn(ctx, boss, Vec3::new(*x, *y, *z), arena.as_deref());
        }
        Some(Commands::Kill { uuid }) => commands::kill(ctx, uuid),
        Some(Commands::Open { player, x, y, z }) => {
            commands::open(ctx, Vec3::new(*x, *y, *z), player);
        }
        Some(Commands::Close { x, y, z }) => commands::close(ctx, Vec3::new(*x, *y, *z)),
        Some(Commands::Bosses) => commands::bosses(ctx),
        Some(Commands::Tracked) => commands::tracked(ctx),
        Some(Commands::Reload) => commands::reload(ctx).await,
        Some(Commands::SetPlayers { count, x, y, z }) => {
            commands::set_players(ctx, *count, Vec3::new(*x, *y, *z));
        }
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
