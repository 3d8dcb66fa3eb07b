use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use shapefall::cli::Cli;
use shapefall::core::audio::{SoundHandle, TerminalBell};
use shapefall::core::game::RngSource;
use shapefall::core::terminal::TerminalGuard;
use shapefall::games::SHAPEFALL;
use shapefall::{Controller, Engine};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // The screen belongs to the game, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }
    tracing::info!(?config, "starting {}", SHAPEFALL.name);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sound = if config.sound {
        SoundHandle::new(TerminalBell)
    } else {
        SoundHandle::silent()
    };
    let controller = Controller::new(RngSource::new(rng), sound);
    let engine = Engine::new(controller, config);

    let mut guard = TerminalGuard::enter()?;
    let result = engine.run(guard.terminal()).await;
    drop(guard);

    let score = result?;
    println!("{}: final score {score}", SHAPEFALL.name);
    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
