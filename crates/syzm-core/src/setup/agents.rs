//! Agent Spawning
//!
//! Functions to spawn agents with randomized position, heading, colour,
//! inventory and demand, and register them in the relationship graph.

use bevy_ecs::prelude::*;
use rand::Rng;
use std::collections::BTreeMap;
use std::f32::consts::TAU;

use super::names::random_name;
use crate::components::agent::{AgentBundle, AgentId, AgentSpec, Color, Demand, Gait};
use crate::components::graph::RelationshipGraph;
use crate::components::resources::{Ledger, ResourceKind};
use crate::components::world::Position;
use crate::config::Config;

/// Generate a random agent.
///
/// Draw order: name, x, y, heading, colour, ledger (dew, bast, sap), demand.
/// Positions fall in the square `[0, min(width, height))`.
pub fn random_agent_spec<R: Rng + ?Sized>(rng: &mut R, config: &Config) -> AgentSpec {
    let name = random_name(rng);

    let side = config.world.width.min(config.world.height);
    let position = Position::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side));
    let heading = rng.gen::<f32>() * TAU;
    let color = Color::PALETTE[rng.gen_range(0..Color::PALETTE.len())];

    let mut ledger = Ledger::new();
    ledger.randomize(rng, config.resources.initial_min, config.resources.initial_max);

    let demand = ResourceKind::ALL[rng.gen_range(0..ResourceKind::COUNT)];

    AgentSpec {
        name,
        position,
        heading,
        color,
        ledger,
        demand,
        gait: Gait::from(&config.movement),
    }
}

/// Spawn one agent and connect it to every existing agent.
pub fn spawn_agent(world: &mut World, spec: AgentSpec) -> AgentId {
    let id = world.resource::<RelationshipGraph>().next_id();
    let entity = world.spawn(AgentBundle::new(id, spec)).id();
    world.resource_mut::<RelationshipGraph>().add_agent(entity)
}

/// Spawn `count` random agents.
pub fn spawn_population<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    config: &Config,
    count: usize,
) -> Vec<AgentId> {
    let mut spawned = Vec::with_capacity(count);
    for _ in 0..count {
        let spec = random_agent_spec(rng, config);
        spawned.push(spawn_agent(world, spec));
    }
    spawned
}

/// Summary of the spawned population
#[derive(Debug, Clone, Default)]
pub struct SpawnSummary {
    pub total_agents: usize,
    pub by_demand: BTreeMap<ResourceKind, usize>,
    pub total_resources: Ledger,
}

/// Count agents per demand and the resources they hold
pub fn get_spawn_summary(world: &mut World) -> SpawnSummary {
    let mut summary = SpawnSummary::default();
    let mut query = world.query::<(&Demand, &Ledger)>();
    for (demand, ledger) in query.iter(world) {
        summary.total_agents += 1;
        *summary.by_demand.entry(demand.0).or_insert(0) += 1;
        summary.total_resources += *ledger;
    }
    summary
}
