//! tilequest headless runner
//!
//! Loads one map from a data directory, runs the world for a number of
//! frames and prints a JSON summary on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tilequest::{Session, SessionOptions, load_config};
use tq_core::{Position, TemplateId};
use tq_data::DataDir;

/// tilequest world simulation
#[derive(Parser, Debug)]
#[command(name = "tilequest")]
#[command(author, version, about = "Run a tilequest map headless", long_about = None)]
struct Args {
    /// Data directory holding entities.xml, monsters/ and maps/
    #[arg(short = 'd', long = "data", default_value = "data")]
    data: PathBuf,

    /// Map id in hex (e.g. 1, 0x2)
    #[arg(short = 'm', long = "map", default_value = "1")]
    map: String,

    /// Number of frames to simulate, 16 ms each
    #[arg(short = 'n', long = "frames", default_value_t = 600)]
    frames: u64,

    /// Random seed
    #[arg(short = 's', long = "seed", default_value_t = 42)]
    seed: u64,

    /// JSON world configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Player start column
    #[arg(long = "player-x", requires = "player_y")]
    player_x: Option<i32>,

    /// Player start row
    #[arg(long = "player-y", requires = "player_x")]
    player_y: Option<i32>,

    /// Attack adjacent monsters automatically
    #[arg(short = 'a', long = "auto-attack")]
    auto_attack: bool,

    /// Print the final viewport before the summary
    #[arg(long = "show")]
    show: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = load_config(args.config.as_deref())?;
    let map_id = TemplateId::from_hex(&args.map)
        .with_context(|| format!("map id '{}' is not hex", args.map))?;
    let player = match (args.player_x, args.player_y) {
        (Some(x), Some(y)) => Some(Position::new(x, y)),
        _ => None,
    };
    let options = SessionOptions {
        seed: args.seed,
        player,
        auto_attack: args.auto_attack,
    };

    let mut session = Session::load(&DataDir::new(&args.data), map_id, config, options)?;
    let ran = session.run(args.frames);
    tracing::info!(frames = ran, kills = session.kills(), "run finished");

    if args.show {
        print!("{}", session.render_ascii());
    }
    println!("{}", serde_json::to_string_pretty(&session.summary())?);
    Ok(())
}
