//! Population Setup
//!
//! Random agent generation and name building.

pub mod agents;
pub mod names;

pub use agents::*;
pub use names::{generate_name, random_name};
