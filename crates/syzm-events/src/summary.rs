//! Run Summary
//!
//! End-of-run statistics written alongside the trade log.

use serde::{Deserialize, Serialize};

use crate::resource::{LedgerSnapshot, ResourceKind};

/// The agent that reached the win threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub agent_id: u32,
    pub name: String,
    pub kind: ResourceKind,
    pub amount: u32,
    pub tick: u64,
}

/// Aggregate statistics for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks_run: u64,
    pub agent_count: usize,
    pub total_trades: u64,
    pub mutual_trades: u64,
    pub units_moved: LedgerSnapshot,
    pub busiest_tick: Option<u64>,
    pub final_totals: LedgerSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<WinnerRecord>,
}

impl RunSummary {
    /// Mean number of trades per tick.
    pub fn trades_per_tick(&self) -> f64 {
        if self.ticks_run == 0 {
            return 0.0;
        }
        self.total_trades as f64 / self.ticks_run as f64
    }

    /// Serializes the summary to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
