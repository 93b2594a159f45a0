//! Agent Components
//!
//! Components for individual traders: identity, heading, gait, demand and the
//! per-tick trading partner link.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::resources::{Ledger, ResourceKind};
use super::world::Position;
use crate::config::MovementConfig;

/// Marker component identifying an entity as an agent
#[derive(Component, Debug, Clone, Default)]
pub struct Agent;

/// Index of an agent in the roster, assigned in insertion order
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// Human-readable name for an agent; not required to be unique
#[derive(Component, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentName(pub String);

/// Bearing in radians
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f32);

/// Display colour; never read by the simulation itself
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0]);
    pub const BLUE: Color = Color([0, 0, 255]);
    pub const RED: Color = Color([255, 0, 0]);
    pub const GREEN: Color = Color([0, 255, 0]);
    pub const ORANGE: Color = Color([255, 165, 0]);
    pub const YELLOW: Color = Color([255, 255, 0]);
    pub const PURPLE: Color = Color([128, 0, 128]);
    pub const CYAN: Color = Color([0, 255, 255]);
    pub const MAGENTA: Color = Color([255, 0, 255]);

    /// Palette agents are coloured from at spawn
    pub const PALETTE: [Color; 10] = [
        Color::WHITE,
        Color::BLACK,
        Color::BLUE,
        Color::RED,
        Color::GREEN,
        Color::ORANGE,
        Color::YELLOW,
        Color::PURPLE,
        Color::CYAN,
        Color::MAGENTA,
    ];

    /// Channel-wise complement, for labels drawn over the agent
    pub fn opposite(self) -> Color {
        let [r, g, b] = self.0;
        Color([255 - r, 255 - g, 255 - b])
    }
}

/// The resource kind an agent is trying to acquire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand(pub ResourceKind);

/// How an agent wanders
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gait {
    /// Probability of stepping on a given tick
    pub steprate: f32,
    /// Length of one step
    pub stepsize: f32,
    /// Scale of the normal heading perturbation before a step
    pub turn_variance: f32,
}

impl Gait {
    /// A gait that never moves
    pub fn still() -> Self {
        Self {
            steprate: 0.0,
            stepsize: 0.0,
            turn_variance: 0.0,
        }
    }
}

impl Default for Gait {
    fn default() -> Self {
        Self::from(&MovementConfig::default())
    }
}

impl From<&MovementConfig> for Gait {
    fn from(config: &MovementConfig) -> Self {
        Self {
            steprate: config.steprate,
            stepsize: config.stepsize,
            turn_variance: config.turn_variance,
        }
    }
}

/// The agent traded with most recently this tick, by roster index
///
/// A lookup, not ownership. Reset at the start of every tick.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradingPartner(pub Option<AgentId>);

impl TradingPartner {
    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn get(&self) -> Option<AgentId> {
        self.0
    }
}

/// Everything needed to place one agent in the world
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSpec {
    pub name: String,
    pub position: Position,
    pub heading: f32,
    pub color: Color,
    pub ledger: Ledger,
    pub demand: ResourceKind,
    pub gait: Gait,
}

impl AgentSpec {
    /// A motionless agent at `position`; tests and scripted setups build on this
    pub fn new(name: impl Into<String>, position: Position, demand: ResourceKind) -> Self {
        Self {
            name: name.into(),
            position,
            heading: 0.0,
            color: Color::WHITE,
            ledger: Ledger::new(),
            demand,
            gait: Gait::still(),
        }
    }

    pub fn with_ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_gait(mut self, gait: Gait) -> Self {
        self.gait = gait;
        self
    }

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Component bundle spawned for every agent
#[derive(Bundle)]
pub struct AgentBundle {
    pub agent: Agent,
    pub id: AgentId,
    pub name: AgentName,
    pub position: Position,
    pub heading: Heading,
    pub color: Color,
    pub ledger: Ledger,
    pub demand: Demand,
    pub gait: Gait,
    pub partner: TradingPartner,
}

impl AgentBundle {
    pub fn new(id: AgentId, spec: AgentSpec) -> Self {
        Self {
            agent: Agent,
            id,
            name: AgentName(spec.name),
            position: spec.position,
            heading: Heading(spec.heading),
            color: spec.color,
            ledger: spec.ledger,
            demand: Demand(spec.demand),
            gait: spec.gait,
            partner: TradingPartner(None),
        }
    }
}
