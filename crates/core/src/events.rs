//! Event delivery
//!
//! The engine hands every [`GameEvent`] to an optional registered sink as it
//! happens, and also buffers it for hosts that prefer polling
//! (`GameState::drain_events`).

use crate::types::GameEvent;

/// Receiver for simulation events
pub trait EventSink {
    fn on_event(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<F> EventSink for F
where
    F: FnMut(GameEvent),
{
    fn on_event(&mut self, event: GameEvent) {
        self(event)
    }
}
