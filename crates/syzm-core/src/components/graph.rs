//! Relationship Graph
//!
//! The complete trade graph over all agents. Every pair of agents is a potential
//! edge, so the graph is stored as the roster alone; edges are enumerated on
//! demand. Only the edges that actually traded this tick are materialised.

use bevy_ecs::prelude::*;

use super::agent::AgentId;

/// Resource: agent roster plus this tick's traded edges
#[derive(Resource, Debug, Default)]
pub struct RelationshipGraph {
    /// `roster[id]` is the entity for `AgentId(id)`
    roster: Vec<Entity>,
    /// Pairs that exchanged at least one unit this tick, lower id first,
    /// in the order they were evaluated
    traded: Vec<(AgentId, AgentId)>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly spawned agent and return its id.
    ///
    /// The new node is implicitly connected to every existing node.
    pub fn add_agent(&mut self, entity: Entity) -> AgentId {
        let id = AgentId(self.roster.len() as u32);
        self.roster.push(entity);
        id
    }

    /// Next id `add_agent` will hand out.
    pub fn next_id(&self) -> AgentId {
        AgentId(self.roster.len() as u32)
    }

    pub fn entity(&self, id: AgentId) -> Option<Entity> {
        self.roster.get(id.index()).copied()
    }

    pub fn roster(&self) -> &[Entity] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Number of edges in the complete graph.
    pub fn edge_count(&self) -> usize {
        let n = self.roster.len();
        n * n.saturating_sub(1) / 2
    }

    /// Every unordered pair exactly once, lexicographic by id.
    pub fn pairs(&self) -> impl Iterator<Item = (AgentId, AgentId)> {
        let n = self.roster.len() as u32;
        (0..n).flat_map(move |a| ((a + 1)..n).map(move |b| (AgentId(a), AgentId(b))))
    }

    pub fn traded_edges(&self) -> &[(AgentId, AgentId)] {
        &self.traded
    }

    /// Whether the pair traded this tick, in either order.
    pub fn has_traded(&self, a: AgentId, b: AgentId) -> bool {
        self.traded.contains(&ordered(a, b))
    }

    pub(crate) fn record_trade(&mut self, a: AgentId, b: AgentId) {
        let edge = ordered(a, b);
        if !self.traded.contains(&edge) {
            self.traded.push(edge);
        }
    }

    pub(crate) fn clear_traded(&mut self) {
        self.traded.clear();
    }
}

fn ordered(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(n: u32) -> RelationshipGraph {
        let mut world = World::new();
        let mut graph = RelationshipGraph::new();
        for _ in 0..n {
            let entity = world.spawn_empty().id();
            graph.add_agent(entity);
        }
        graph
    }

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut world = World::new();
        let mut graph = RelationshipGraph::new();
        let first = world.spawn_empty().id();
        let second = world.spawn_empty().id();

        assert_eq!(graph.add_agent(first), AgentId(0));
        assert_eq!(graph.next_id(), AgentId(1));
        assert_eq!(graph.add_agent(second), AgentId(1));
        assert_eq!(graph.entity(AgentId(1)), Some(second));
        assert_eq!(graph.entity(AgentId(2)), None);
    }

    #[test]
    fn test_pairs_cover_complete_graph_once() {
        let graph = graph_with(5);
        let pairs: Vec<_> = graph.pairs().collect();

        assert_eq!(pairs.len(), graph.edge_count());
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[0], (AgentId(0), AgentId(1)));
        assert_eq!(pairs[4], (AgentId(1), AgentId(2)));
        assert_eq!(pairs[9], (AgentId(3), AgentId(4)));
        assert!(pairs.iter().all(|(a, b)| a < b));
    }

    #[test]
    fn test_small_graphs_have_no_pairs() {
        assert_eq!(graph_with(0).pairs().count(), 0);
        assert_eq!(graph_with(1).pairs().count(), 0);
        assert_eq!(graph_with(1).edge_count(), 0);
    }

    #[test]
    fn test_traded_edges_are_normalised() {
        let mut graph = graph_with(3);
        graph.record_trade(AgentId(2), AgentId(0));
        graph.record_trade(AgentId(0), AgentId(2));

        assert_eq!(graph.traded_edges(), &[(AgentId(0), AgentId(2))]);
        assert!(graph.has_traded(AgentId(2), AgentId(0)));
        assert!(!graph.has_traded(AgentId(0), AgentId(1)));

        graph.clear_traded();
        assert!(graph.traded_edges().is_empty());
    }
}
