//! Tactics client binary.
//!
//! Composition root: reads configuration, installs logging, loads a script
//! and replays it through the router.
//!
//! ```bash
//! cargo run -p tactics-client -- crates/client/scenarios/skirmish.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tactics_client::{ClientConfig, Replayer, Script, logging};

#[derive(Parser)]
#[command(name = "tactics")]
#[command(about = "Replays scripted input against a tactical battle", long_about = None)]
#[command(version)]
struct Cli {
    /// Script to replay; overrides TACTICS_SCENARIO
    #[arg(value_name = "SCRIPT")]
    scenario: Option<PathBuf>,

    /// Tile edge in pixels; overrides TACTICS_TILE_SIZE
    #[arg(long, value_name = "PIXELS")]
    tile_size: Option<i32>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(path) = cli.scenario {
        config.scenario = Some(path);
    }
    if let Some(size) = cli.tile_size {
        config.tile_size = size.max(1);
    }

    let _guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    let path = config
        .scenario
        .clone()
        .context("no script given (pass a path or set TACTICS_SCENARIO)")?;
    let script = Script::load(&path)?;
    tracing::info!(
        path = %path.display(),
        events = script.events.len(),
        "script loaded"
    );

    let mut router = script
        .scenario
        .router_builder(config.router_config())?
        .build()?;

    let summary = Replayer::new(config.tile_size).run(&mut router, &script.events);
    tracing::info!(
        applied = summary.applied,
        skipped = summary.skipped,
        quit = summary.quit,
        round = router.turn().round(),
        units = router.world().roster.len(),
        "replay finished"
    );
    Ok(())
}
