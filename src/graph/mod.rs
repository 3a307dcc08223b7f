//! Graph model and store for the workflow canvas.
//!
//! This module owns the canonical node/edge collections and the referential
//! invariants the rest of the editor relies on:
//!
//! - Node and edge ids are unique within a graph
//! - Every edge endpoint references a node present in the same graph
//! - A node delete cascades to its incident edges in the same mutation, so
//!   a dangling edge is never observable
//!
//! # Quick Start
//!
//! ```rust
//! use flowcanvas::blocks::BlockKind;
//! use flowcanvas::graph::{GraphStore, Position};
//! use rustc_hash::FxHashMap;
//!
//! let mut store = GraphStore::new();
//! let trigger = store.add_node(BlockKind::Trigger, Position { x: 0, y: 0 }, FxHashMap::default());
//! let action = store.add_node(BlockKind::Action, Position { x: 100, y: 100 }, FxHashMap::default());
//! store.add_edge(trigger.id.clone(), action.id.clone(), None).unwrap();
//!
//! store.delete_node(&action.id).unwrap();
//! assert!(store.graph().edges.is_empty());
//! ```

mod model;
mod store;


pub use model::{Edge, EdgeId, Graph, Node, NodeId, Position};
pub use store::{GraphError, GraphStore};
