//! Mutable store enforcing the graph's referential invariants.

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;

use super::model::{Edge, EdgeId, Graph, Node, NodeId, Position};
use crate::blocks::BlockKind;

/// Errors produced by store mutations.
///
/// All variants are recoverable: a failed mutation leaves the store
/// exactly as it was, and callers surface the error as a notification.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    /// An edge endpoint does not reference an existing node.
    #[error("invalid edge: endpoint {endpoint} does not exist")]
    #[diagnostic(
        code(flowcanvas::graph::invalid_edge),
        help("Both endpoints of an edge must be nodes already present in the graph.")
    )]
    InvalidEdge { endpoint: NodeId },

    /// No node with the given id exists.
    #[error("unknown node: {id}")]
    #[diagnostic(code(flowcanvas::graph::unknown_node))]
    UnknownNode { id: NodeId },

    /// No edge with the given id exists.
    #[error("unknown edge: {id}")]
    #[diagnostic(code(flowcanvas::graph::unknown_edge))]
    UnknownEdge { id: EdgeId },
}

/// Owner of the canonical node/edge collections.
///
/// All mutating operations are synchronous and atomic: validation happens
/// before any state is touched, so either the full effect (including the
/// edge cascade on node delete) is applied or nothing is.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    graph: Graph,
}

impl GraphStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over an existing graph (import path).
    #[must_use]
    pub fn from_graph(graph: Graph) -> Self {
        Self { graph }
    }

    /// Read-only view of the current graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Deep copy of the current graph, for snapshots and simulation runs.
    pub fn snapshot(&self) -> Graph {
        self.graph.clone()
    }

    /// Replace the whole graph. Used by undo/redo/restore and import; the
    /// incoming graph has already been validated by its producer.
    pub fn load(&mut self, graph: Graph) {
        self.graph = graph;
    }

    /// Drop all nodes and edges.
    pub fn clear(&mut self) {
        self.graph = Graph::default();
    }

    /// Add a node of the given kind at a position, seeded with `data`.
    ///
    /// Returns a clone of the created node.
    pub fn add_node(
        &mut self,
        kind: BlockKind,
        position: Position,
        data: FxHashMap<String, Value>,
    ) -> Node {
        let node = Node {
            id: NodeId::generate(),
            kind,
            position,
            data,
        };
        tracing::debug!(id = %node.id, %kind, "add node");
        self.graph.nodes.push(node.clone());
        node
    }

    /// Merge `patch` into a node's `data` map.
    pub fn update_node_data(
        &mut self,
        id: &NodeId,
        patch: FxHashMap<String, Value>,
    ) -> Result<(), GraphError> {
        let node = self
            .graph
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })?;
        node.data.extend(patch);
        Ok(())
    }

    /// Move a node to a new (already snapped) position.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> Result<(), GraphError> {
        let node = self
            .graph
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })?;
        node.position = position;
        Ok(())
    }

    /// Delete a node, cascading to every incident edge in the same
    /// mutation. Dangling edges are never observable.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<(), GraphError> {
        if !self.graph.contains_node(id) {
            return Err(GraphError::UnknownNode { id: id.clone() });
        }
        let before = self.graph.edges.len();
        self.graph.edges.retain(|e| !e.touches(id));
        self.graph.nodes.retain(|n| &n.id != id);
        tracing::debug!(%id, cascaded = before - self.graph.edges.len(), "delete node");
        Ok(())
    }

    /// Duplicate a node: fresh id, position offset by `offset`, identical
    /// data. Incident edges are not copied.
    pub fn duplicate_node(&mut self, id: &NodeId, offset: Position) -> Result<Node, GraphError> {
        let original = self
            .graph
            .node(id)
            .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })?;
        let copy = Node {
            id: NodeId::generate(),
            kind: original.kind,
            position: original.position.offset_by(offset),
            data: original.data.clone(),
        };
        tracing::debug!(from = %id, to = %copy.id, "duplicate node");
        self.graph.nodes.push(copy.clone());
        Ok(copy)
    }

    /// Connect two existing nodes.
    ///
    /// Fails with [`GraphError::InvalidEdge`] if either endpoint is absent;
    /// nothing is mutated on failure. Self-loops are permitted but flagged,
    /// pending an explicit product decision.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        label: Option<String>,
    ) -> Result<Edge, GraphError> {
        if !self.graph.contains_node(&source) {
            return Err(GraphError::InvalidEdge { endpoint: source });
        }
        if !self.graph.contains_node(&target) {
            return Err(GraphError::InvalidEdge { endpoint: target });
        }
        let edge = Edge {
            id: EdgeId::generate(),
            source,
            target,
            label,
        };
        if edge.is_self_loop() {
            tracing::warn!(node = %edge.source, "self-loop edge created");
        }
        self.graph.edges.push(edge.clone());
        Ok(edge)
    }

    /// Delete an edge by id.
    pub fn delete_edge(&mut self, id: &EdgeId) -> Result<(), GraphError> {
        let before = self.graph.edges.len();
        self.graph.edges.retain(|e| &e.id != id);
        if self.graph.edges.len() == before {
            return Err(GraphError::UnknownEdge { id: id.clone() });
        }
        Ok(())
    }

    /// Set or clear an edge's label.
    pub fn update_edge_label(
        &mut self,
        id: &EdgeId,
        label: Option<String>,
    ) -> Result<(), GraphError> {
        let edge = self
            .graph
            .edges
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| GraphError::UnknownEdge { id: id.clone() })?;
        edge.label = label;
        Ok(())
    }
}
