//! Simulation Driver
//!
//! Owns the ECS world and the per-tick schedule, and exposes the read-only
//! observation surface used by the runner and by tests.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use syzm_events::{AgentSnapshot, PopulationSnapshot, TradeEvent};

use crate::components::agent::{AgentId, AgentName, AgentSpec, Color, Demand, Heading, TradingPartner};
use crate::components::graph::RelationshipGraph;
use crate::components::resources::Ledger;
use crate::components::world::{Position, WorldBounds};
use crate::config::{Config, ConfigError};
use crate::events::TickEvents;
use crate::setup::{get_spawn_summary, spawn_agent, spawn_population, SpawnSummary};
use crate::systems::{self, begin_tick, movement_phase, trade_phase, SimulationClock, TradeRules, Winner};
use crate::SimRng;

/// A running population of traders
pub struct Simulation {
    world: World,
    schedule: Schedule,
    config: Config,
}

impl Simulation {
    /// Build an empty simulation from a validated configuration.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        world.insert_resource(SimRng(SmallRng::seed_from_u64(config.simulation.seed)));
        world.insert_resource(WorldBounds::from_config(&config.world));
        world.insert_resource(TradeRules::from_config(&config.trade));
        world.insert_resource(RelationshipGraph::new());
        world.insert_resource(SimulationClock::new());
        world.insert_resource(TickEvents::new());

        // Movement must finish before any pair is evaluated
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((begin_tick, movement_phase, trade_phase).chain());

        tracing::info!(
            seed = config.simulation.seed,
            width = config.world.width,
            height = config.world.height,
            toroidal = config.world.toroidal,
            "Simulation initialized"
        );

        Ok(Self {
            world,
            schedule,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Direct access to the underlying ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Add one agent with explicit attributes.
    pub fn add_agent(&mut self, spec: AgentSpec) -> AgentId {
        spawn_agent(&mut self.world, spec)
    }

    /// Add `count` random agents drawn from the simulation RNG.
    pub fn populate(&mut self, count: usize) -> Vec<AgentId> {
        let config = &self.config;
        let ids = self.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            spawn_population(world, &mut rng.0, config, count)
        });
        tracing::info!(agents = self.agent_count(), "Population spawned");
        ids
    }

    /// Count the population per demand.
    pub fn spawn_summary(&mut self) -> SpawnSummary {
        get_spawn_summary(&mut self.world)
    }

    /// Run one tick: reset derived state, move every agent, resolve every pair.
    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
    }

    /// Number of the last completed tick.
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<SimulationClock>().current_tick
    }

    pub fn agent_count(&self) -> usize {
        self.graph().len()
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.agent_count() as u32).map(AgentId)
    }

    fn graph(&self) -> &RelationshipGraph {
        self.world.resource::<RelationshipGraph>()
    }

    fn component<T: Component>(&self, id: AgentId) -> Option<&T> {
        let entity = self.graph().entity(id)?;
        self.world.get::<T>(entity)
    }

    pub fn ledger(&self, id: AgentId) -> Option<&Ledger> {
        self.component::<Ledger>(id)
    }

    pub fn position(&self, id: AgentId) -> Option<Position> {
        self.component::<Position>(id).copied()
    }

    pub fn name(&self, id: AgentId) -> Option<&str> {
        self.component::<AgentName>(id).map(|name| name.0.as_str())
    }

    /// The agent this one traded with during the last tick.
    pub fn partner(&self, id: AgentId) -> Option<AgentId> {
        self.component::<TradingPartner>(id).and_then(TradingPartner::get)
    }

    /// Pairs that traded during the last tick, lower id first.
    pub fn traded_edges(&self) -> &[(AgentId, AgentId)] {
        self.graph().traded_edges()
    }

    /// Trade events produced by the last tick.
    pub fn events(&self) -> &[TradeEvent] {
        self.world.resource::<TickEvents>().events()
    }

    /// Take the last tick's trade events, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<TradeEvent> {
        self.world.resource_mut::<TickEvents>().drain()
    }

    /// First agent, in roster order, holding at least `win_amount` of one kind.
    pub fn check_winner(&self, win_amount: u32) -> Option<Winner> {
        let population = self
            .agent_ids()
            .filter_map(|id| self.ledger(id).map(|ledger| (id, ledger)));
        systems::check_winner(population, win_amount)
    }

    /// Sum of every agent's holdings.
    pub fn resource_totals(&self) -> Ledger {
        self.agent_ids()
            .filter_map(|id| self.ledger(id))
            .fold(Ledger::new(), |total, ledger| total + *ledger)
    }

    /// Serializable view of every agent, in roster order.
    pub fn population(&self) -> Vec<AgentSnapshot> {
        self.graph()
            .roster()
            .iter()
            .filter_map(|&entity| {
                let id = self.world.get::<AgentId>(entity)?;
                let name = self.world.get::<AgentName>(entity)?;
                let position = self.world.get::<Position>(entity)?;
                let heading = self.world.get::<Heading>(entity)?;
                let color = self.world.get::<Color>(entity)?;
                let ledger = self.world.get::<Ledger>(entity)?;
                let demand = self.world.get::<Demand>(entity)?;
                let partner = self.world.get::<TradingPartner>(entity)?;

                Some(AgentSnapshot {
                    agent_id: id.0,
                    name: name.0.clone(),
                    x: position.x,
                    y: position.y,
                    heading: heading.0,
                    color: color.0,
                    ledger: ledger.snapshot(),
                    demand: demand.0,
                    trading_with: partner.get().map(|p| p.0),
                })
            })
            .collect()
    }

    /// Capture the whole population after the last tick.
    pub fn snapshot(&self, snapshot_id: &str, triggered_by: &str) -> PopulationSnapshot {
        let bounds = self.world.resource::<WorldBounds>();
        let mut snapshot =
            PopulationSnapshot::new(snapshot_id, self.current_tick(), triggered_by, bounds.snapshot());
        snapshot.agents = self.population();
        snapshot.traded_edges = self.traded_edges().iter().map(|(a, b)| (a.0, b.0)).collect();
        snapshot.totals = self.resource_totals().snapshot();
        snapshot
    }
}
