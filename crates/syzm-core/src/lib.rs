//! Syzm Trading Simulation Library
//!
//! Wandering agents on a 2-D plane barter single units of three goods with
//! whoever is close enough, until one of them corners a market.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod events;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{Config, ConfigError};
pub use simulation::Simulation;
pub use systems::Winner;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
