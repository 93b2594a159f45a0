//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without recompiling.
//! Every section and key is optional; missing values fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub world: WorldConfig,
    pub movement: MovementConfig,
    pub trade: TradeConfig,
    pub resources: ResourceConfig,
}

/// Run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the single simulation RNG
    pub seed: u64,
    /// Number of agents spawned by `populate`
    pub agents: usize,
    /// Upper bound on ticks when no agent wins
    pub max_ticks: u64,
    /// Ticks between population snapshots
    pub snapshot_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            agents: 20,
            max_ticks: 10_000,
            snapshot_interval: 100,
        }
    }
}

/// World dimensions and boundary behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Wrap positions around the edges instead of clamping them
    pub toroidal: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
            toroidal: true,
        }
    }
}

/// Default gait given to every spawned agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Probability of moving on a given tick (0-1)
    pub steprate: f32,
    /// Distance covered by one step, in world units
    pub stepsize: f32,
    /// Scale of the normal heading perturbation applied before each step
    pub turn_variance: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            steprate: 0.5,
            stepsize: 5.0,
            turn_variance: 0.4,
        }
    }
}

/// Trade protocol parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Pairs strictly closer than this may trade
    pub trade_distance: f32,
    /// Fraction of the way to the shared midpoint each partner moves after a trade
    pub attraction: f32,
    /// Units of a single kind that end the game
    pub win_amount: u32,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            trade_distance: 100.0,
            attraction: 0.5,
            win_amount: 50,
        }
    }
}

/// Initial inventory range, `[initial_min, initial_max)` per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub initial_min: u32,
    pub initial_max: u32,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            initial_min: 0,
            initial_max: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !(world.width.is_finite() && world.height.is_finite())
            || world.width <= 0.0
            || world.height <= 0.0
        {
            return Err(ConfigError::InvalidWorldSize {
                width: world.width,
                height: world.height,
            });
        }

        let movement = &self.movement;
        if !(0.0..=1.0).contains(&movement.steprate) {
            return Err(ConfigError::StepRateOutOfRange(movement.steprate));
        }
        if !movement.stepsize.is_finite() || movement.stepsize < 0.0 {
            return Err(ConfigError::InvalidStepSize(movement.stepsize));
        }
        if !movement.turn_variance.is_finite() || movement.turn_variance < 0.0 {
            return Err(ConfigError::InvalidTurnVariance(movement.turn_variance));
        }

        let trade = &self.trade;
        if trade.trade_distance.is_nan() || trade.trade_distance < 0.0 {
            return Err(ConfigError::InvalidTradeDistance(trade.trade_distance));
        }
        if !(0.0..=1.0).contains(&trade.attraction) {
            return Err(ConfigError::AttractionOutOfRange(trade.attraction));
        }
        if trade.win_amount == 0 {
            return Err(ConfigError::ZeroWinAmount);
        }

        let resources = &self.resources;
        if resources.initial_min >= resources.initial_max {
            return Err(ConfigError::EmptyResourceRange {
                min: resources.initial_min,
                max: resources.initial_max,
            });
        }
        // Every per-kind total must fit in a ledger count
        let supply = u64::from(resources.initial_max - 1) * self.simulation.agents as u64;
        if supply > u64::from(u32::MAX) {
            return Err(ConfigError::ResourceSupplyTooLarge {
                agents: self.simulation.agents,
                max: resources.initial_max,
            });
        }

        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("world dimensions must be positive, got {width} x {height}")]
    InvalidWorldSize { width: f32, height: f32 },
    #[error("steprate must be within [0, 1], got {0}")]
    StepRateOutOfRange(f32),
    #[error("stepsize must be non-negative, got {0}")]
    InvalidStepSize(f32),
    #[error("turn variance must be non-negative, got {0}")]
    InvalidTurnVariance(f32),
    #[error("trade distance must be non-negative, got {0}")]
    InvalidTradeDistance(f32),
    #[error("attraction must be within [0, 1], got {0}")]
    AttractionOutOfRange(f32),
    #[error("win amount must be at least 1")]
    ZeroWinAmount,
    #[error("initial resource range [{min}, {max}) is empty")]
    EmptyResourceRange { min: u32, max: u32 },
    #[error("{agents} agents with up to {max} units each overflow a ledger count")]
    ResourceSupplyTooLarge { agents: usize, max: u32 },
}
