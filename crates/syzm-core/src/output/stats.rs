//! Statistics Output
//!
//! Accumulates trade counts across a run and writes the final `RunSummary`.

use std::fs;
use std::path::Path;

use syzm_events::{RunSummary, TradeEvent, WinnerRecord};

use crate::components::resources::{Ledger, ResourceKind};
use crate::simulation::Simulation;
use crate::systems::Winner;

/// Statistics file name inside the output directory
pub const STATS_FILE: &str = "stats.json";

/// Running trade statistics
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    pub total_trades: u64,
    pub mutual_trades: u64,
    /// Units moved per kind, summed over every transfer
    pub units_moved: Ledger,
    /// (tick, trades) of the tick with the most trades so far
    pub busiest: Option<(u64, usize)>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the events from one tick
    pub fn record_tick(&mut self, tick: u64, events: &[TradeEvent]) {
        for event in events {
            self.total_trades += 1;
            if event.is_mutual() {
                self.mutual_trades += 1;
            }
            let units = event.units_by_kind();
            for kind in ResourceKind::ALL {
                *self.units_moved.get_mut(kind) += units[kind.index()];
            }
        }

        if events.is_empty() {
            return;
        }
        match self.busiest {
            Some((_, most)) if most >= events.len() => {}
            _ => self.busiest = Some((tick, events.len())),
        }
    }

    /// Build the end-of-run summary
    pub fn generate_summary(&self, sim: &Simulation, winner: Option<&Winner>) -> RunSummary {
        let winner = winner.map(|w| WinnerRecord {
            agent_id: w.agent.0,
            name: sim.name(w.agent).unwrap_or_default().to_string(),
            kind: w.kind,
            amount: w.amount,
            tick: sim.current_tick(),
        });

        RunSummary {
            seed: sim.config().simulation.seed,
            ticks_run: sim.current_tick(),
            agent_count: sim.agent_count(),
            total_trades: self.total_trades,
            mutual_trades: self.mutual_trades,
            units_moved: self.units_moved.snapshot(),
            busiest_tick: self.busiest.map(|(tick, _)| tick),
            final_totals: sim.resource_totals().snapshot(),
            winner,
        }
    }
}

/// Write statistics as `<dir>/stats.json`
pub fn write_stats(summary: &RunSummary, dir: impl AsRef<Path>) -> std::io::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let json = summary
        .to_json_pretty()
        .map_err(std::io::Error::other)?;

    fs::write(dir.join(STATS_FILE), json)
}
