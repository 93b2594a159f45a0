//! Trade System
//!
//! Evaluates every unordered pair of agents once per tick. Pairs that are close
//! enough and want different goods swap at most one unit in each direction,
//! then drift toward each other.

use bevy_ecs::prelude::*;

use crate::components::agent::{AgentId, AgentName, Demand, TradingPartner};
use crate::components::graph::RelationshipGraph;
use crate::components::resources::{Ledger, ResourceKind};
use crate::components::world::{Position, WorldBounds};
use crate::config::TradeConfig;
use crate::events::TickEvents;
use crate::systems::lifecycle::SimulationClock;
use syzm_events::{TradeEvent, Transfer};

/// Resource: trade protocol parameters
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TradeRules {
    /// Pairs strictly closer than this may trade
    pub trade_distance: f32,
    /// Fraction of the way to the shared midpoint each partner moves after trading
    pub attraction: f32,
}

impl TradeRules {
    pub fn from_config(config: &TradeConfig) -> Self {
        Self {
            trade_distance: config.trade_distance,
            attraction: config.attraction,
        }
    }
}

impl Default for TradeRules {
    fn default() -> Self {
        Self::from_config(&TradeConfig::default())
    }
}

/// Units moved by one exchange attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exchange {
    /// Kind received by the first agent, if any
    pub to_first: Option<ResourceKind>,
    /// Kind received by the second agent, if any
    pub to_second: Option<ResourceKind>,
}

impl Exchange {
    pub fn succeeded(&self) -> bool {
        self.to_first.is_some() || self.to_second.is_some()
    }
}

/// What happened to a pair this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Too far apart; partner links cleared
    OutOfRange,
    /// Both want the same good; partner links cleared
    SameDemand,
    /// Eligible, but neither holds what the other wants
    NothingToTrade,
    Traded(Exchange),
}

/// One side of a pair under evaluation
pub struct Trader<'a> {
    pub id: AgentId,
    pub position: &'a mut Position,
    pub ledger: &'a mut Ledger,
    pub demand: ResourceKind,
    pub partner: &'a mut TradingPartner,
}

/// Swap at most one unit each way between two agents with different demands.
///
/// The first agent receives one unit of its demand if the second holds any;
/// independently the second receives one unit of its demand if the first
/// holds any. Only units that exist are moved.
pub fn exchange(
    first: &mut Ledger,
    first_demand: ResourceKind,
    second: &mut Ledger,
    second_demand: ResourceKind,
) -> Exchange {
    let to_first = second.give_one(first_demand, first).then_some(first_demand);
    let to_second = first.give_one(second_demand, second).then_some(second_demand);
    Exchange {
        to_first,
        to_second,
    }
}

/// Run the trade protocol for one pair.
///
/// Partner links are cleared when the pair is out of range or wants the same
/// good, set to each other after a successful exchange, and left alone when an
/// eligible pair has nothing to swap.
pub fn resolve_pair(
    rules: &TradeRules,
    bounds: &WorldBounds,
    first: Trader<'_>,
    second: Trader<'_>,
) -> PairOutcome {
    if bounds.distance(*first.position, *second.position) >= rules.trade_distance {
        first.partner.clear();
        second.partner.clear();
        return PairOutcome::OutOfRange;
    }

    if first.demand == second.demand {
        first.partner.clear();
        second.partner.clear();
        return PairOutcome::SameDemand;
    }

    let exchange = exchange(first.ledger, first.demand, second.ledger, second.demand);
    if !exchange.succeeded() {
        return PairOutcome::NothingToTrade;
    }

    first.partner.0 = Some(second.id);
    second.partner.0 = Some(first.id);
    attract(bounds, rules.attraction, first.position, second.position);

    PairOutcome::Traded(exchange)
}

/// Move both partners toward their shared midpoint.
///
/// The midpoint is measured before either moves, so the pull is symmetric.
fn attract(bounds: &WorldBounds, attraction: f32, first: &mut Position, second: &mut Position) {
    if attraction <= 0.0 {
        return;
    }
    let (dx, dy) = bounds.delta(*first, *second);
    let pull_x = dx * 0.5 * attraction;
    let pull_y = dy * 0.5 * attraction;
    *first = bounds.advance(*first, pull_x, pull_y);
    *second = bounds.advance(*second, -pull_x, -pull_y);
}

/// System: evaluate every pair, lexicographic by agent id
pub fn trade_phase(
    rules: Res<TradeRules>,
    bounds: Res<WorldBounds>,
    clock: Res<SimulationClock>,
    mut graph: ResMut<RelationshipGraph>,
    mut events: ResMut<TickEvents>,
    mut agents: Query<(&AgentName, &mut Position, &mut Ledger, &Demand, &mut TradingPartner)>,
) {
    let pairs: Vec<(AgentId, AgentId)> = graph.pairs().collect();

    for (a, b) in pairs {
        let (Some(entity_a), Some(entity_b)) = (graph.entity(a), graph.entity(b)) else {
            continue;
        };
        let Ok([agent_a, agent_b]) = agents.get_many_mut([entity_a, entity_b]) else {
            continue;
        };
        let (name_a, mut position_a, mut ledger_a, demand_a, mut partner_a) = agent_a;
        let (name_b, mut position_b, mut ledger_b, demand_b, mut partner_b) = agent_b;

        let outcome = resolve_pair(
            &rules,
            &bounds,
            Trader {
                id: a,
                position: &mut *position_a,
                ledger: &mut *ledger_a,
                demand: demand_a.0,
                partner: &mut *partner_a,
            },
            Trader {
                id: b,
                position: &mut *position_b,
                ledger: &mut *ledger_b,
                demand: demand_b.0,
                partner: &mut *partner_b,
            },
        );

        let PairOutcome::Traded(exchange) = outcome else {
            continue;
        };

        graph.record_trade(a, b);

        let mut transfers = Vec::with_capacity(2);
        if let Some(kind) = exchange.to_first {
            transfers.push(Transfer {
                from: b.0,
                to: a.0,
                kind,
            });
        }
        if let Some(kind) = exchange.to_second {
            transfers.push(Transfer {
                from: a.0,
                to: b.0,
                kind,
            });
        }

        tracing::debug!(
            tick = clock.current_tick,
            "{} : {:?} <-> {} : {:?}",
            name_a.0,
            ledger_a.as_tuple(),
            name_b.0,
            ledger_b.as_tuple()
        );

        let event_id = events.next_id();
        events.push(TradeEvent {
            event_id,
            tick: clock.current_tick,
            first: a.0,
            first_name: name_a.0.clone(),
            second: b.0,
            second_name: name_b.0.clone(),
            transfers,
            first_after: ledger_a.snapshot(),
            second_after: ledger_b.snapshot(),
        });
    }
}
