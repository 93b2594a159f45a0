//! Trading scenarios driven through the public simulation API

use syzm_core::{AgentId, AgentSpec, Config, Ledger, Position, ResourceKind, Simulation};

/// Agents added by hand never move, so distances stay fixed
fn sim_with(trade_distance: f32, toroidal: bool) -> Simulation {
    let mut config = Config::default();
    config.trade.trade_distance = trade_distance;
    config.world.toroidal = toroidal;
    Simulation::new(config).unwrap()
}

fn add_pair(sim: &mut Simulation, gap: f32) -> (AgentId, AgentId) {
    let a = sim.add_agent(
        AgentSpec::new("Ka", Position::new(100.0, 200.0), ResourceKind::Dew)
            .with_ledger(Ledger::from_counts(0, 5, 0)),
    );
    let b = sim.add_agent(
        AgentSpec::new("Lo", Position::new(100.0 + gap, 200.0), ResourceKind::Bast)
            .with_ledger(Ledger::from_counts(3, 0, 0)),
    );
    (a, b)
}

#[test]
fn test_two_agents_in_range_trade() {
    let mut sim = sim_with(100.0, true);
    let (a, b) = add_pair(&mut sim, 50.0);

    sim.tick();

    assert_eq!(sim.ledger(a).unwrap().as_tuple(), (1, 4, 0));
    assert_eq!(sim.ledger(b).unwrap().as_tuple(), (2, 1, 0));
    assert_eq!(sim.partner(a), Some(b));
    assert_eq!(sim.partner(b), Some(a));
    assert_eq!(sim.traded_edges(), &[(a, b)]);

    let events = sim.drain_events();
    assert_eq!(events.len(), 1);
    assert!(events[0].is_mutual());
    assert_eq!(events[0].tick, 1);
    assert_eq!(events[0].first_name, "Ka");
}

#[test]
fn test_two_agents_out_of_range_do_nothing() {
    let mut sim = sim_with(100.0, false);
    let (a, b) = add_pair(&mut sim, 150.0);

    sim.tick();

    assert_eq!(sim.ledger(a).unwrap().as_tuple(), (0, 5, 0));
    assert_eq!(sim.ledger(b).unwrap().as_tuple(), (3, 0, 0));
    assert_eq!(sim.partner(a), None);
    assert_eq!(sim.partner(b), None);
    assert!(sim.traded_edges().is_empty());
    assert!(sim.drain_events().is_empty());
}

#[test]
fn test_partners_reset_once_goods_run_out() {
    let mut sim = sim_with(100.0, true);
    let (a, b) = add_pair(&mut sim, 10.0);

    // B runs out of dew after three ticks, A keeps handing over bast
    for _ in 0..3 {
        sim.tick();
    }
    assert_eq!(sim.ledger(a).unwrap().as_tuple(), (3, 2, 0));
    assert_eq!(sim.ledger(b).unwrap().as_tuple(), (0, 3, 0));

    // Two more one-sided trades drain A's bast, then nothing is left to move
    sim.tick();
    sim.tick();
    assert_eq!(sim.ledger(a).unwrap().as_tuple(), (3, 0, 0));
    assert_eq!(sim.ledger(b).unwrap().as_tuple(), (0, 5, 0));

    sim.tick();
    assert_eq!(sim.partner(a), None);
    assert_eq!(sim.partner(b), None);
    assert!(sim.traded_edges().is_empty());
}

#[test]
fn test_equal_demands_never_trade() {
    let mut sim = sim_with(100.0, true);
    let a = sim.add_agent(
        AgentSpec::new("Ka", Position::new(10.0, 10.0), ResourceKind::Sap)
            .with_ledger(Ledger::from_counts(0, 0, 9)),
    );
    let b = sim.add_agent(
        AgentSpec::new("Lo", Position::new(12.0, 10.0), ResourceKind::Sap)
            .with_ledger(Ledger::from_counts(0, 0, 9)),
    );

    sim.tick();

    assert_eq!(sim.partner(a), None);
    assert_eq!(sim.partner(b), None);
    assert_eq!(sim.ledger(a).unwrap().as_tuple(), (0, 0, 9));
    assert_eq!(sim.ledger(b).unwrap().as_tuple(), (0, 0, 9));
}

#[test]
fn test_trade_across_wrapped_edge() {
    let mut sim = sim_with(100.0, true);
    let a = sim.add_agent(
        AgentSpec::new("Ka", Position::new(5.0, 600.0), ResourceKind::Dew)
            .with_ledger(Ledger::from_counts(0, 1, 0)),
    );
    let b = sim.add_agent(
        AgentSpec::new("Lo", Position::new(710.0, 600.0), ResourceKind::Bast)
            .with_ledger(Ledger::from_counts(1, 0, 0)),
    );

    sim.tick();

    assert_eq!(sim.traded_edges(), &[(a, b)]);
    assert_eq!(sim.ledger(a).unwrap().as_tuple(), (1, 0, 0));

    // The short way round is 15 units through x = 0, so each closes a quarter
    // of it toward the seam
    let pa = sim.position(a).unwrap();
    let pb = sim.position(b).unwrap();
    assert!((pa.x - 1.25).abs() < 1e-4);
    assert!((pb.x - 713.75).abs() < 1e-4);
    assert_eq!(pa.y, 600.0);
    assert_eq!(pb.y, 600.0);
}

#[test]
fn test_winner_scenarios() {
    let mut sim = sim_with(100.0, false);
    sim.add_agent(
        AgentSpec::new("Ka", Position::new(0.0, 0.0), ResourceKind::Dew)
            .with_ledger(Ledger::from_counts(49, 49, 49)),
    );
    sim.add_agent(
        AgentSpec::new("Lo", Position::new(500.0, 0.0), ResourceKind::Dew)
            .with_ledger(Ledger::from_counts(0, 49, 0)),
    );
    assert_eq!(sim.check_winner(50), None);

    let c = sim.add_agent(
        AgentSpec::new("Mu", Position::new(0.0, 1000.0), ResourceKind::Dew)
            .with_ledger(Ledger::from_counts(0, 0, 50)),
    );
    let winner = sim.check_winner(50).unwrap();
    assert_eq!(winner.agent, c);
    assert_eq!(winner.kind, ResourceKind::Sap);
    assert_eq!(sim.name(winner.agent), Some("Mu"));
}

#[test]
fn test_random_population_runs_to_completion() {
    let mut config = Config::default();
    config.simulation.seed = 2024;
    config.trade.win_amount = 15;
    let mut sim = Simulation::new(config).unwrap();
    sim.populate(20);

    let mut trades = 0;
    let mut winner = None;
    while sim.current_tick() < 2000 && winner.is_none() {
        sim.tick();
        trades += sim.drain_events().len();
        winner = sim.check_winner(15);
    }

    assert!(trades > 0);
    let snapshot = sim.snapshot("snap_000001", "test");
    assert_eq!(snapshot.agents.len(), 20);
    assert_eq!(snapshot.traded_edges.len(), sim.traded_edges().len());
}
