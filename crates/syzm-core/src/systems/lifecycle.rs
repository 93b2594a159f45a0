//! Tick Lifecycle
//!
//! Clears the derived per-tick state before movement and trading run.

use bevy_ecs::prelude::*;

use crate::components::agent::{Agent, TradingPartner};
use crate::components::graph::RelationshipGraph;
use crate::events::TickEvents;

/// Resource: tick counter
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    /// Number of the tick in progress, or of the last completed tick between runs
    pub current_tick: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}

/// System: open a new tick
///
/// Advances the clock, forgets last tick's traded edges and events, and resets
/// every partner link so no stale value survives into this tick.
pub fn begin_tick(
    mut clock: ResMut<SimulationClock>,
    mut graph: ResMut<RelationshipGraph>,
    mut events: ResMut<TickEvents>,
    mut partners: Query<&mut TradingPartner, With<Agent>>,
) {
    clock.advance_tick();
    graph.clear_traded();
    events.clear();

    for mut partner in partners.iter_mut() {
        partner.clear();
    }
}
