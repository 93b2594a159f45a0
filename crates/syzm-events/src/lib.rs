//! Shared event types and serialization for the syzm trading simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The core crate produces these values; log readers and tooling consume them.

pub mod event;
pub mod resource;
pub mod snapshot;
pub mod summary;

pub use event::{generate_event_id, TradeEvent, Transfer};
pub use resource::{LedgerSnapshot, ParseResourceKindError, ResourceKind};
pub use snapshot::{generate_snapshot_id, AgentSnapshot, PopulationSnapshot, WorldBoundsSnapshot};
pub use summary::{RunSummary, WinnerRecord};
