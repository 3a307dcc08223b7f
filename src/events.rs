//! Editor event fan-out.
//!
//! The store and history never talk to a rendering layer directly; the
//! controller publishes [`EditorEvent`]s on an [`EventHub`] and any number
//! of subscribers (a canvas renderer, a progress panel, a test harness)
//! receive their own copy over a flume channel. Disconnected subscribers
//! are pruned on the next emit.

use std::sync::{Arc, Mutex};

use crate::graph::NodeId;
use crate::history::SnapshotId;
use crate::simulation::SimulationMetrics;

/// Events published by the editor core.
#[derive(Clone, Debug)]
pub enum EditorEvent {
    /// The graph changed (any committed mutation, import, undo/redo/restore).
    GraphChanged,
    /// The selection moved to a node, or was cleared.
    SelectionChanged(Option<NodeId>),
    /// The history cursor moved to the given snapshot.
    HistoryMoved(SnapshotId),
    /// A simulation run began.
    SimulationStarted,
    /// One simulation tick completed for a node.
    SimulationTick {
        node: NodeId,
        metrics: SimulationMetrics,
    },
    /// The simulation run ended, normally or by cancellation.
    SimulationFinished {
        cancelled: bool,
        metrics: SimulationMetrics,
    },
}

/// Fan-out hub handing each subscriber its own unbounded channel.
#[derive(Clone, Debug, Default)]
pub struct EventHub {
    subscribers: Arc<Mutex<Vec<flume::Sender<EditorEvent>>>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> flume::Receiver<EditorEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers
            .lock()
            .expect("subscriber list poisoned")
            .push(tx);
        rx
    }

    /// Deliver an event to every live subscriber, dropping the dead ones.
    pub fn emit(&self, event: EditorEvent) {
        let mut subscribers = self.subscribers.lock().expect("subscriber list poisoned");
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_gets_a_copy() {
        let hub = EventHub::new();
        let a = hub.subscribe();
        let b = hub.subscribe();
        hub.emit(EditorEvent::GraphChanged);
        assert!(matches!(a.try_recv(), Ok(EditorEvent::GraphChanged)));
        assert!(matches!(b.try_recv(), Ok(EditorEvent::GraphChanged)));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let hub = EventHub::new();
        let a = hub.subscribe();
        drop(hub.subscribe());
        hub.emit(EditorEvent::GraphChanged);
        hub.emit(EditorEvent::SelectionChanged(None));
        assert_eq!(a.len(), 2);
    }
}
