//! World Components
//!
//! The plane agents move on: positions, boundary handling and distances.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::WorldConfig;
use syzm_events::WorldBoundsSnapshot;

/// Component: an agent's position on the plane
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Resource: world dimensions and boundary mode
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    /// Wrap around the edges; otherwise clamp into `[0, dimension]`
    pub toroidal: bool,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32, toroidal: bool) -> Self {
        Self {
            width,
            height,
            toroidal,
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.width, config.height, config.toroidal)
    }

    /// Apply a displacement under the boundary rule.
    ///
    /// Toroidal worlds land every axis in `[0, dimension)`; bounded worlds clamp
    /// into `[0, dimension]`.
    pub fn advance(&self, position: Position, dx: f32, dy: f32) -> Position {
        let x = position.x + dx;
        let y = position.y + dy;
        if self.toroidal {
            Position::new(wrap_axis(x, self.width), wrap_axis(y, self.height))
        } else {
            Position::new(x.clamp(0.0, self.width), y.clamp(0.0, self.height))
        }
    }

    /// Vector from `from` to `to`.
    ///
    /// On a torus this is the shortest of the wrapped candidates on each axis.
    pub fn delta(&self, from: Position, to: Position) -> (f32, f32) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if self.toroidal {
            (shortest_offset(dx, self.width), shortest_offset(dy, self.height))
        } else {
            (dx, dy)
        }
    }

    /// Euclidean distance under the same convention as [`WorldBounds::delta`].
    pub fn distance(&self, a: Position, b: Position) -> f32 {
        let (dx, dy) = self.delta(a, b);
        dx.hypot(dy)
    }

    pub fn snapshot(&self) -> WorldBoundsSnapshot {
        WorldBoundsSnapshot {
            width: self.width,
            height: self.height,
            toroidal: self.toroidal,
        }
    }
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

fn shortest_offset(offset: f32, extent: f32) -> f32 {
    let wrapped = offset.rem_euclid(extent);
    if wrapped > extent / 2.0 {
        wrapped - extent
    } else {
        wrapped
    }
}
