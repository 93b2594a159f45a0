//! Movement System
//!
//! Random-walk movement: each agent may take one step per tick along a heading
//! that drifts by a normally distributed amount.

use bevy_ecs::prelude::*;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::components::agent::{Gait, Heading};
use crate::components::graph::RelationshipGraph;
use crate::components::world::{Position, WorldBounds};
use crate::SimRng;

/// Decide whether an agent steps this tick and where it lands.
///
/// Draws one uniform value for the step decision and, only when stepping, one
/// standard normal value for the heading drift. Returns the new position and
/// heading, or `None` if the agent stays put.
pub fn take_step<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: &WorldBounds,
    position: Position,
    heading: f32,
    gait: &Gait,
) -> Option<(Position, f32)> {
    if rng.gen::<f32>() >= gait.steprate {
        return None;
    }

    let drift: f32 = rng.sample(StandardNormal);
    let bearing = heading + drift * gait.turn_variance;
    let dx = bearing.cos() * gait.stepsize;
    let dy = bearing.sin() * gait.stepsize;

    Some((bounds.advance(position, dx, dy), bearing))
}

/// System: move every agent, in roster order
pub fn movement_phase(
    bounds: Res<WorldBounds>,
    graph: Res<RelationshipGraph>,
    mut rng: ResMut<SimRng>,
    mut agents: Query<(&mut Position, &mut Heading, &Gait)>,
) {
    for &entity in graph.roster() {
        let Ok((mut position, mut heading, gait)) = agents.get_mut(entity) else {
            continue;
        };

        if let Some((next, bearing)) = take_step(&mut rng.0, &bounds, *position, heading.0, gait) {
            *position = next;
            heading.0 = bearing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn gait(steprate: f32, stepsize: f32, turn_variance: f32) -> Gait {
        Gait {
            steprate,
            stepsize,
            turn_variance,
        }
    }

    #[test]
    fn test_zero_steprate_never_moves() {
        let mut rng = SmallRng::seed_from_u64(1);
        let bounds = WorldBounds::new(100.0, 100.0, true);
        for _ in 0..100 {
            let step = take_step(&mut rng, &bounds, Position::new(5.0, 5.0), 0.0, &gait(0.0, 5.0, 0.4));
            assert!(step.is_none());
        }
    }

    #[test]
    fn test_straight_step_covers_stepsize() {
        let mut rng = SmallRng::seed_from_u64(2);
        let bounds = WorldBounds::new(100.0, 100.0, false);
        let (next, bearing) =
            take_step(&mut rng, &bounds, Position::new(50.0, 50.0), 0.0, &gait(1.0, 5.0, 0.0))
                .expect("steprate 1 always steps");

        assert_eq!(bearing, 0.0);
        assert!((next.x - 55.0).abs() < 1e-4);
        assert!((next.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_heading_drifts_with_variance() {
        let mut rng = SmallRng::seed_from_u64(3);
        let bounds = WorldBounds::new(100.0, 100.0, true);
        let mut heading = 0.0;
        let mut position = Position::new(50.0, 50.0);
        for _ in 0..20 {
            let (next, bearing) =
                take_step(&mut rng, &bounds, position, heading, &gait(1.0, 2.0, 0.4)).unwrap();
            position = next;
            heading = bearing;
        }
        assert_ne!(heading, 0.0);
    }

    #[test]
    fn test_movement_keeps_agents_on_torus() {
        let mut rng = SmallRng::seed_from_u64(4);
        let bounds = WorldBounds::new(30.0, 20.0, true);
        let mut position = Position::new(29.0, 1.0);
        let mut heading = 0.3;
        for _ in 0..500 {
            if let Some((next, bearing)) =
                take_step(&mut rng, &bounds, position, heading, &gait(0.8, 7.0, 1.0))
            {
                position = next;
                heading = bearing;
            }
            assert!((0.0..30.0).contains(&position.x));
            assert!((0.0..20.0).contains(&position.y));
        }
    }

    #[test]
    fn test_movement_phase_follows_roster() {
        let mut world = World::new();
        world.insert_resource(WorldBounds::new(100.0, 100.0, false));
        world.insert_resource(SimRng(SmallRng::seed_from_u64(5)));

        let walker = world
            .spawn((Position::new(10.0, 10.0), Heading(0.0), gait(1.0, 3.0, 0.0)))
            .id();
        let sitter = world
            .spawn((Position::new(20.0, 20.0), Heading(0.0), Gait::still()))
            .id();

        let mut graph = RelationshipGraph::new();
        graph.add_agent(walker);
        graph.add_agent(sitter);
        world.insert_resource(graph);

        let mut schedule = Schedule::default();
        schedule.add_systems(movement_phase);
        schedule.run(&mut world);

        let walked = world.get::<Position>(walker).unwrap();
        assert!((walked.x - 13.0).abs() < 1e-4);
        assert_eq!(world.get::<Position>(sitter), Some(&Position::new(20.0, 20.0)));
    }
}
