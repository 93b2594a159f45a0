//! Syzm Trading Simulation
//!
//! Headless runner: spawns a population, ticks until someone corners a market
//! or the tick limit is reached, and writes the trade log, snapshots and stats.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use syzm_core::config::{Config, DEFAULT_TUNING_PATH};
use syzm_core::events::EventLogger;
use syzm_core::output::{self, SnapshotGenerator, StatsCollector};
use syzm_core::Simulation;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "syzm")]
#[command(about = "Wandering agents barter until one corners a market")]
struct Args {
    /// Tuning file (TOML); defaults apply when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of agents to spawn
    #[arg(long)]
    agents: Option<usize>,

    /// Units of a single good needed to win
    #[arg(long)]
    win_amount: Option<u32>,

    /// Clamp agents to the world edges instead of wrapping
    #[arg(long)]
    bounded: bool,

    /// Directory for snapshots and statistics
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Trade log file (JSON Lines); relative paths land in the output directory
    #[arg(long, default_value = "trades.jsonl")]
    events: PathBuf,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.simulation.max_ticks = ticks;
        }
        if let Some(agents) = self.agents {
            config.simulation.agents = agents;
        }
        if let Some(win_amount) = self.win_amount {
            config.trade.win_amount = win_amount;
        }
        if self.bounded {
            config.world.toroidal = false;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };
    args.apply_overrides(&mut config);

    tracing::info!(
        seed = config.simulation.seed,
        agents = config.simulation.agents,
        max_ticks = config.simulation.max_ticks,
        win_amount = config.trade.win_amount,
        "Starting syzm (tuning default: {})",
        DEFAULT_TUNING_PATH
    );

    let mut sim = Simulation::new(config.clone()).context("invalid configuration")?;
    sim.populate(config.simulation.agents);

    let summary = sim.spawn_summary();
    for (demand, count) in &summary.by_demand {
        tracing::info!("  {} agents want {}", count, demand);
    }
    tracing::info!("  {} goods in circulation", summary.total_resources);

    let snapshot_dir = args.output_dir.join("snapshots");
    let events_path = args.output_dir.join(&args.events);
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let mut logger = EventLogger::new(&events_path)
        .with_context(|| format!("failed to open trade log {}", events_path.display()))?;
    let mut generator = SnapshotGenerator::new(config.simulation.snapshot_interval);
    let mut stats = StatsCollector::new();

    let initial = output::generate_snapshot(&sim, &mut generator, "simulation_start");
    output::write_snapshot_to_dir(&initial, &snapshot_dir).context("failed to write initial snapshot")?;
    output::write_current_state(&initial, &args.output_dir).context("failed to write current state")?;

    let mut winner = None;
    while sim.current_tick() < config.simulation.max_ticks {
        sim.tick();
        let tick = sim.current_tick();

        let events = sim.drain_events();
        if let Err(e) = logger.log_batch(&events) {
            tracing::warn!("Could not log trades at tick {}: {}", tick, e);
        }
        stats.record_tick(tick, &events);

        if generator.should_snapshot(tick) {
            let snapshot = output::generate_snapshot(&sim, &mut generator, "periodic");
            if let Err(e) = output::write_snapshot_to_dir(&snapshot, &snapshot_dir) {
                tracing::warn!("Could not write snapshot at tick {}: {}", tick, e);
            }
            if let Err(e) = output::write_current_state(&snapshot, &args.output_dir) {
                tracing::warn!("Could not write current state at tick {}: {}", tick, e);
            }
            tracing::info!(
                "Tick {} / {} ({} trades so far)",
                tick,
                config.simulation.max_ticks,
                stats.total_trades
            );
        }

        winner = sim.check_winner(config.trade.win_amount);
        if let Some(found) = &winner {
            let name = sim.name(found.agent).unwrap_or_default();
            tracing::info!(
                tick,
                amount = found.amount,
                kind = %found.kind,
                "{} wins!",
                name
            );
            break;
        }
    }

    logger.flush().context("failed to flush trade log")?;

    let last = output::generate_snapshot(&sim, &mut generator, "simulation_end");
    output::write_snapshot_to_dir(&last, &snapshot_dir).context("failed to write final snapshot")?;
    output::write_current_state(&last, &args.output_dir).context("failed to write current state")?;

    let run_summary = stats.generate_summary(&sim, winner.as_ref());
    output::write_stats(&run_summary, &args.output_dir).context("failed to write statistics")?;

    if winner.is_none() {
        tracing::info!("No winner after {} ticks", sim.current_tick());
    }
    tracing::info!(
        "Simulation complete. {} trades over {} ticks, {} snapshots, log at {}",
        run_summary.total_trades,
        run_summary.ticks_run,
        generator.snapshot_count(),
        events_path.display()
    );

    Ok(())
}
