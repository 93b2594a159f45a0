//! ECS Systems
//!
//! The per-tick pipeline: open the tick, move every agent, then resolve trades.
//! Win evaluation is a read-only query run by the caller between ticks.

pub mod lifecycle;
pub mod movement;
pub mod trade;
pub mod winner;

pub use lifecycle::{begin_tick, SimulationClock};
pub use movement::{movement_phase, take_step};
pub use trade::{exchange, resolve_pair, trade_phase, Exchange, PairOutcome, TradeRules, Trader};
pub use winner::{check_winner, Winner};
