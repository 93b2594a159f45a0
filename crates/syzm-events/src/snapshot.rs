//! Snapshot Types
//!
//! Serialization structs for population snapshots.
//!
//! A snapshot captures everything an observer needs to draw one frame:
//! positions, colours, inventories, partner links and the traded edges.

use serde::{Deserialize, Serialize};

use crate::resource::{LedgerSnapshot, ResourceKind};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// World dimensions and boundary mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBoundsSnapshot {
    pub width: f32,
    pub height: f32,
    pub toroidal: bool,
}

/// Full agent snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub color: [u8; 3],
    pub ledger: LedgerSnapshot,
    pub demand: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trading_with: Option<u32>,
}

/// Complete population snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    pub triggered_by: String,
    pub world: WorldBoundsSnapshot,
    pub agents: Vec<AgentSnapshot>,
    #[serde(default)]
    pub traded_edges: Vec<(u32, u32)>,
    pub totals: LedgerSnapshot,
}

impl PopulationSnapshot {
    /// Creates an empty snapshot.
    pub fn new(
        snapshot_id: impl Into<String>,
        tick: u64,
        triggered_by: impl Into<String>,
        world: WorldBoundsSnapshot,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            tick,
            triggered_by: triggered_by.into(),
            world,
            agents: Vec::new(),
            traded_edges: Vec::new(),
            totals: LedgerSnapshot::default(),
        }
    }

    /// Finds an agent by ID.
    pub fn find_agent(&self, agent_id: u32) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Whether the pair traded during the snapshot's tick, in either order.
    pub fn has_traded_edge(&self, a: u32, b: u32) -> bool {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.traded_edges.contains(&key)
    }

    /// Number of agents currently linked to a partner.
    pub fn trading_agent_count(&self) -> usize {
        self.agents.iter().filter(|a| a.trading_with.is_some()).count()
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
