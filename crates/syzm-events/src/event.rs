//! Trade Events
//!
//! Records of completed exchanges, one per traded pair per tick.

use serde::{Deserialize, Serialize};

use crate::resource::{LedgerSnapshot, ResourceKind};

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("trade_{:08}", sequence)
}

/// One unit moved from one agent to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: u32,
    pub to: u32,
    pub kind: ResourceKind,
}

/// A completed exchange between two agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub event_id: String,
    pub tick: u64,
    /// Lower agent id of the pair
    pub first: u32,
    pub first_name: String,
    /// Higher agent id of the pair
    pub second: u32,
    pub second_name: String,
    /// One or two transfers, in evaluation order
    pub transfers: Vec<Transfer>,
    /// Ledgers after the exchange
    pub first_after: LedgerSnapshot,
    pub second_after: LedgerSnapshot,
}

impl TradeEvent {
    /// Whether the given agent took part in this exchange.
    pub fn involves(&self, agent_id: u32) -> bool {
        self.first == agent_id || self.second == agent_id
    }

    /// Whether both directions of the exchange succeeded.
    pub fn is_mutual(&self) -> bool {
        self.transfers.len() == 2
    }

    /// Units of each kind moved by this exchange, in stable kind order.
    pub fn units_by_kind(&self) -> [u32; ResourceKind::COUNT] {
        let mut counts = [0; ResourceKind::COUNT];
        for transfer in &self.transfers {
            counts[transfer.kind.index()] += 1;
        }
        counts
    }

    /// Serializes the event to a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
