//! Core model types for workflow graphs.
//!
//! These types are the unit of versioning and serialization: a [`Graph`]
//! is what history snapshots deep-copy and what the codec encodes. Field
//! names on the wire follow the workflow JSON contract
//! (`sourceNodeId`/`targetNodeId`).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a node within a graph.
///
/// Generated ids are UUID v4 strings; imported ids are kept verbatim, so
/// the type is an opaque string rather than a parsed UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Mint a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier of an edge within a graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Mint a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Canvas position in grid-aligned canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    /// Translate by a delta, component-wise.
    #[must_use]
    pub fn offset_by(self, delta: Position) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

/// A workflow node: one placed block on the canvas.
///
/// `data` always contains at least `label`; the remaining keys depend on
/// the block kind (a wait node carries `time` + `unit`, a decision node
/// carries `condition`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: crate::blocks::BlockKind,
    pub position: Position,
    #[serde(default)]
    pub data: FxHashMap<String, Value>,
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    #[serde(rename = "sourceNodeId")]
    pub source: NodeId,
    #[serde(rename = "targetNodeId")]
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// Returns `true` if either endpoint is the given node.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    /// Returns `true` if source and target are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// The unit of versioning and serialization.
///
/// Nodes and edges are stored in creation order; the simulation walk and
/// the canonical JSON encoding both depend on that order being stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    /// Returns `true` if a node with the id exists.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }
}
