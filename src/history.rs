//! Linear version history with an undo/redo cursor.
//!
//! The history is an append-only list of immutable graph snapshots plus a
//! cursor pointing at the current one. A push after an undo truncates the
//! redo tail (the standard "new branch discards redo tail" rule); undo,
//! redo, and restore only ever move the cursor.
//!
//! # Restore policy
//!
//! `restore` jumps the cursor to an arbitrary snapshot and preserves every
//! snapshot, exactly as a sequence of undo/redo calls would. The redo tail
//! is discarded only by the next [`push`](HistoryManager::push). This is
//! the single policy applied everywhere; restore is never itself recorded
//! as a mutation.
//!
//! # Examples
//!
//! ```rust
//! use flowcanvas::graph::Graph;
//! use flowcanvas::history::HistoryManager;
//!
//! let mut history = HistoryManager::new(Graph::default(), "initial", 64);
//! history.push(Graph::default(), "edit 1");
//! assert!(history.can_undo());
//!
//! history.undo().unwrap();
//! assert!(history.can_redo());
//!
//! // A push from here discards the redo tail.
//! history.push(Graph::default(), "edit 2");
//! assert!(!history.can_redo());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::graph::Graph;

/// Unique identifier of a stored snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub String);

impl SnapshotId {
    /// Mint a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One immutable entry in the version history.
///
/// Snapshots deep-copy the graph at push time and are never mutated after
/// creation; undo/redo hand out references into them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionSnapshot {
    pub id: SnapshotId,
    pub at: DateTime<Utc>,
    pub label: String,
    pub graph: Graph,
}

/// Append-only snapshot list with an undo/redo cursor.
///
/// Invariant: the history is never empty and `cursor < history.len()`,
/// so there is always a current snapshot.
#[derive(Clone, Debug)]
pub struct HistoryManager {
    history: Vec<VersionSnapshot>,
    cursor: usize,
    capacity: usize,
}

impl HistoryManager {
    /// Seed the history with an initial snapshot.
    ///
    /// `capacity` bounds the number of retained snapshots; the oldest are
    /// dropped beyond it (minimum 1).
    #[must_use]
    pub fn new(initial: Graph, label: impl Into<String>, capacity: usize) -> Self {
        Self {
            history: vec![Self::snapshot_of(initial, label.into())],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    fn snapshot_of(graph: Graph, label: String) -> VersionSnapshot {
        VersionSnapshot {
            id: SnapshotId::generate(),
            at: Utc::now(),
            label,
            graph,
        }
    }

    /// Record a committed mutation.
    ///
    /// Truncates the redo tail, appends a snapshot of `graph`, and advances
    /// the cursor to it. Enforces the capacity bound by dropping the oldest
    /// snapshots.
    pub fn push(&mut self, graph: Graph, label: impl Into<String>) -> &VersionSnapshot {
        self.history.truncate(self.cursor + 1);
        self.history.push(Self::snapshot_of(graph, label.into()));
        self.cursor = self.history.len() - 1;
        if self.history.len() > self.capacity {
            let overflow = self.history.len() - self.capacity;
            self.history.drain(..overflow);
            self.cursor -= overflow;
        }
        tracing::debug!(cursor = self.cursor, len = self.history.len(), "history push");
        &self.history[self.cursor]
    }

    /// Step the cursor back one snapshot.
    ///
    /// Returns the graph to display, or `None` at the oldest snapshot
    /// (a recoverable boundary, surfaced as a disabled control).
    pub fn undo(&mut self) -> Option<&Graph> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.history[self.cursor].graph)
    }

    /// Step the cursor forward one snapshot. `None` at the newest.
    pub fn redo(&mut self) -> Option<&Graph> {
        if self.cursor + 1 >= self.history.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.history[self.cursor].graph)
    }

    /// Jump the cursor directly to a snapshot by id.
    ///
    /// Behaves like the equivalent sequence of undo/redo calls: the cursor
    /// moves, every snapshot is preserved. `None` if the id is unknown.
    pub fn restore(&mut self, id: &SnapshotId) -> Option<&Graph> {
        let index = self.history.iter().position(|s| &s.id == id)?;
        self.cursor = index;
        Some(&self.history[self.cursor].graph)
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> &VersionSnapshot {
        &self.history[self.cursor]
    }

    /// All retained snapshots, oldest first.
    pub fn snapshots(&self) -> &[VersionSnapshot] {
        &self.history
    }

    /// Returns `true` if `undo` would move the cursor.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if `redo` would move the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockKind;
    use crate::graph::GraphStore;

    fn graph_with_nodes(count: usize) -> Graph {
        let mut store = GraphStore::new();
        for i in 0..count {
            store.add_node(
                BlockKind::Action,
                crate::graph::Position {
                    x: i as i64 * 20,
                    y: 0,
                },
                Default::default(),
            );
        }
        store.snapshot()
    }

    #[test]
    fn undo_n_times_returns_initial() {
        let mut history = HistoryManager::new(graph_with_nodes(0), "initial", 64);
        for i in 1..=3 {
            history.push(graph_with_nodes(i), format!("edit {i}"));
        }
        for _ in 0..3 {
            assert!(history.undo().is_some());
        }
        assert!(history.current().graph.nodes.is_empty());
        assert!(history.undo().is_none());
    }

    #[test]
    fn redo_returns_to_latest() {
        let mut history = HistoryManager::new(graph_with_nodes(0), "initial", 64);
        for i in 1..=3 {
            history.push(graph_with_nodes(i), format!("edit {i}"));
        }
        while history.undo().is_some() {}
        for _ in 0..3 {
            assert!(history.redo().is_some());
        }
        assert_eq!(history.current().graph.nodes.len(), 3);
        assert!(history.redo().is_none());
    }

    #[test]
    fn push_after_undo_discards_redo_tail() {
        let mut history = HistoryManager::new(graph_with_nodes(0), "initial", 64);
        history.push(graph_with_nodes(1), "edit 1");
        history.push(graph_with_nodes(2), "edit 2");
        history.undo().unwrap();
        history.push(graph_with_nodes(5), "branch");
        assert!(history.redo().is_none());
        assert_eq!(history.current().graph.nodes.len(), 5);
        assert_eq!(history.snapshots().len(), 3);
    }

    #[test]
    fn restore_moves_cursor_without_truncating() {
        let mut history = HistoryManager::new(graph_with_nodes(0), "initial", 64);
        history.push(graph_with_nodes(1), "edit 1");
        history.push(graph_with_nodes(2), "edit 2");
        let first = history.snapshots()[0].id.clone();

        let restored = history.restore(&first).unwrap();
        assert!(restored.nodes.is_empty());
        // All snapshots preserved; redo walks forward again.
        assert_eq!(history.snapshots().len(), 3);
        assert!(history.redo().is_some());
        assert!(history.redo().is_some());
        assert_eq!(history.current().graph.nodes.len(), 2);

        assert!(history.restore(&SnapshotId::generate()).is_none());
    }

    #[test]
    fn capacity_drops_oldest_snapshots() {
        let mut history = HistoryManager::new(graph_with_nodes(0), "initial", 3);
        for i in 1..=5 {
            history.push(graph_with_nodes(i), format!("edit {i}"));
        }
        assert_eq!(history.snapshots().len(), 3);
        assert_eq!(history.current().graph.nodes.len(), 5);
        // Oldest retained snapshot is edit 3.
        assert_eq!(history.snapshots()[0].graph.nodes.len(), 3);
    }

    #[test]
    fn snapshots_are_independent_of_later_edits() {
        let mut history = HistoryManager::new(graph_with_nodes(1), "initial", 64);
        let mut store = GraphStore::from_graph(history.current().graph.clone());
        let id = store.graph().nodes[0].id.clone();
        store.delete_node(&id).unwrap();
        history.push(store.snapshot(), "delete");

        // The first snapshot still holds the node.
        assert_eq!(history.snapshots()[0].graph.nodes.len(), 1);
    }
}
