//! Shared helpers for the integration suites.

use flowcanvas::blocks::BlockKind;
use flowcanvas::graph::{Graph, GraphStore, Node, Position};
use rustc_hash::FxHashMap;
use serde_json::json;

/// Build a small linear workflow: trigger -> wait -> action, two edges.
#[allow(dead_code)]
pub fn linear_graph() -> Graph {
    let mut store = GraphStore::new();
    let trigger = store.add_node(
        BlockKind::Trigger,
        Position { x: 0, y: 0 },
        labeled("Trigger"),
    );
    let wait = store.add_node(BlockKind::Wait, Position { x: 120, y: 0 }, labeled("Wait"));
    let action = store.add_node(
        BlockKind::Action,
        Position { x: 240, y: 0 },
        labeled("Send email"),
    );
    store
        .add_edge(trigger.id.clone(), wait.id.clone(), None)
        .unwrap();
    store
        .add_edge(wait.id.clone(), action.id.clone(), None)
        .unwrap();
    store.snapshot()
}

/// A data map holding only a label, the minimum every node carries.
#[allow(dead_code)]
pub fn labeled(label: &str) -> FxHashMap<String, serde_json::Value> {
    let mut data = FxHashMap::default();
    data.insert("label".to_string(), json!(label));
    data
}

/// Add `count` action nodes to a store, returning the created nodes.
#[allow(dead_code)]
pub fn add_actions(store: &mut GraphStore, count: usize) -> Vec<Node> {
    (0..count)
        .map(|i| {
            store.add_node(
                BlockKind::Action,
                Position {
                    x: i as i64 * 40,
                    y: 0,
                },
                labeled("Send email"),
            )
        })
        .collect()
}
