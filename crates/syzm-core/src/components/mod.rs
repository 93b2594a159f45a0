//! ECS Components
//!
//! All entity components and shared resources for agents, ledgers and the world.

pub mod agent;
pub mod graph;
pub mod resources;
pub mod world;

pub use agent::*;
pub use graph::*;
pub use resources::*;
pub use world::*;
