//! rezwatch-sim - drives the watcher from a recorded scenario.
//!
//! Stands in for the game host: feeds zone changes and per-frame rosters to a
//! `WatcherContext` and prints the resulting highlights as text.
//!
//! Usage: rezwatch-sim <scenario.json> [--config PATH] [--frames N]

mod render;
mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rezwatch_core::WatcherContext;
use rezwatch_core::config::ConfyStore;
use tracing_subscriber::filter::EnvFilter;

use crate::render::TextRenderer;
use crate::scenario::Scenario;

#[derive(Parser)]
#[command(version, about = "Replay a roster scenario through the watcher")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Settings file; defaults to the per-user config location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short, long)]
    frames: Option<u64>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If REZWATCH_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("REZWATCH_LOG_PATH")
        && let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(file)
            .init();
        return;
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let scenario = match Scenario::load(&args.scenario).and_then(|s| s.validate().map(|()| s)) {
        Ok(scenario) => scenario,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load scenario");
            return ExitCode::FAILURE;
        }
    };

    let store = match args.config {
        Some(path) => ConfyStore::at_path(path),
        None => ConfyStore::default(),
    };
    tracing::info!(settings = %store.describe(), ticks = scenario.tick_count(), "Starting replay");

    let mut ctx = WatcherContext::new(scenario.game_data.clone(), store);
    let mut renderer = TextRenderer::new(std::io::stdout().lock());
    let limit = args.frames.unwrap_or(u64::MAX);
    let mut tick = 0u64;

    'frames: for frame in &scenario.frames {
        if let Some(zone) = frame.zone {
            ctx.on_zone_changed(zone);
        }
        let roster = frame.roster();

        for _ in 0..frame.repeat {
            if tick >= limit {
                break 'frames;
            }
            let outcome = ctx.on_tick(&roster);
            let highlights = ctx.highlights();

            // A broken frame must not stop the replay
            if let Err(e) = renderer.render(tick, outcome, ctx.table(), &highlights) {
                tracing::error!(error = %e, tick, "Failed to render frame");
            }
            tick += 1;
        }
    }

    tracing::info!(ticks = tick, "Replay finished");
    ExitCode::SUCCESS
}
