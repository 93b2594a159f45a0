//! Win Evaluation
//!
//! Read-only scan for an agent that has cornered a single good.

use crate::components::agent::AgentId;
use crate::components::resources::{Ledger, ResourceKind};

/// An agent holding at least the win amount of one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Winner {
    pub agent: AgentId,
    /// The agent's largest holding
    pub kind: ResourceKind,
    pub amount: u32,
}

/// Return the first agent, in the given order, holding at least `win_amount`
/// units of any single kind.
pub fn check_winner<'a, I>(population: I, win_amount: u32) -> Option<Winner>
where
    I: IntoIterator<Item = (AgentId, &'a Ledger)>,
{
    population.into_iter().find_map(|(agent, ledger)| {
        let (kind, amount) = ledger.max_holding();
        (amount >= win_amount).then_some(Winner { agent, kind, amount })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_qualifying_agent_wins() {
        let ledgers = [
            Ledger::from_counts(10, 20, 30),
            Ledger::from_counts(3, 50, 1),
            Ledger::from_counts(49, 49, 49),
        ];
        let population = ledgers.iter().enumerate().map(|(i, l)| (AgentId(i as u32), l));

        let winner = check_winner(population, 50).expect("agent 1 holds 50 bast");
        assert_eq!(winner.agent, AgentId(1));
        assert_eq!(winner.kind, ResourceKind::Bast);
        assert_eq!(winner.amount, 50);
    }

    #[test]
    fn test_no_winner_below_threshold() {
        let ledgers = [Ledger::from_counts(49, 0, 49), Ledger::from_counts(0, 49, 0)];
        let population = ledgers.iter().enumerate().map(|(i, l)| (AgentId(i as u32), l));

        assert_eq!(check_winner(population, 50), None);
    }

    #[test]
    fn test_first_in_order_wins_ties() {
        let ledgers = [Ledger::from_counts(0, 0, 60), Ledger::from_counts(80, 0, 0)];
        let population = ledgers.iter().enumerate().map(|(i, l)| (AgentId(i as u32), l));

        let winner = check_winner(population, 50).unwrap();
        assert_eq!(winner.agent, AgentId(0));
        assert_eq!(winner.kind, ResourceKind::Sap);
    }

    #[test]
    fn test_empty_population() {
        assert_eq!(check_winner(std::iter::empty(), 1), None);
    }
}
