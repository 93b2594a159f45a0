//! Trade Events
//!
//! Per-tick event buffer and the append-only JSONL trade log.

use bevy_ecs::prelude::*;

use syzm_events::{generate_event_id, TradeEvent};

pub mod logger;

pub use logger::EventLogger;

/// Resource: trade events produced during the current tick
///
/// Cleared at the start of every tick. Event ids keep counting across ticks.
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    events: Vec<TradeEvent>,
    next_sequence: u64,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next event ID
    pub fn next_id(&mut self) -> String {
        self.next_sequence += 1;
        generate_event_id(self.next_sequence)
    }

    pub fn push(&mut self, event: TradeEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TradeEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<TradeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syzm_events::LedgerSnapshot;

    fn event(id: String) -> TradeEvent {
        TradeEvent {
            event_id: id,
            tick: 1,
            first: 0,
            first_name: "Ka".to_string(),
            second: 1,
            second_name: "Lo".to_string(),
            transfers: Vec::new(),
            first_after: LedgerSnapshot::default(),
            second_after: LedgerSnapshot::default(),
        }
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut events = TickEvents::new();
        assert_eq!(events.next_id(), "trade_00000001");
        events.clear();
        assert_eq!(events.next_id(), "trade_00000002");
    }

    #[test]
    fn test_drain_empties_buffer() {
        let mut events = TickEvents::new();
        assert!(events.is_empty());

        let id = events.next_id();
        events.push(event(id));
        assert_eq!(events.len(), 1);
        assert_eq!(events.events()[0].event_id, "trade_00000001");

        let drained = events.drain();
        assert_eq!(drained.len(), 1);
        assert!(events.is_empty());
    }
}
