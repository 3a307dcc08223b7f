//! Canonical JSON interchange for workflow graphs.
//!
//! The workflow JSON format is the editor's only wire/file contract:
//!
//! ```json
//! {
//!   "nodes": [ { "id": "...", "kind": "action", "position": {"x": 100, "y": 40}, "data": { "label": "Send email" } } ],
//!   "edges": [ { "id": "...", "sourceNodeId": "...", "targetNodeId": "...", "label": "yes" } ]
//! }
//! ```
//!
//! Decoding is two-stage: a JSON syntax error surfaces as
//! [`CodecError::Malformed`], and a structurally invalid document surfaces
//! as [`CodecError::Schema`] with a detail naming the offending element.
//! Decode never partially applies; on any failure the caller's current
//! graph is untouched because a [`Graph`] is only produced for a fully
//! valid payload.
//!
//! # Round-trip
//!
//! For any graph `g`, `decode(&encode(&g)?)` is structurally equal to `g`.

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;
use thiserror::Error;

use crate::blocks::BlockKind;
use crate::graph::{Edge, EdgeId, Graph, Node, NodeId, Position};

/// Errors produced while encoding or decoding workflow JSON.
#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    /// The text is not valid JSON.
    #[error("malformed workflow JSON: {source}")]
    #[diagnostic(
        code(flowcanvas::codec::malformed),
        help("The import text must be a JSON document produced by export.")
    )]
    Malformed {
        #[from]
        source: serde_json::Error,
    },

    /// The JSON parses but is not a structurally valid workflow.
    #[error("invalid workflow document: {detail}")]
    #[diagnostic(code(flowcanvas::codec::schema))]
    Schema { detail: String },
}

fn schema(detail: impl Into<String>) -> CodecError {
    CodecError::Schema {
        detail: detail.into(),
    }
}

/// Encode a graph as compact canonical JSON.
pub fn encode(graph: &Graph) -> Result<String, CodecError> {
    Ok(serde_json::to_string(graph)?)
}

/// Encode a graph as pretty-printed JSON, the form handed to the
/// clipboard by the export command.
pub fn encode_pretty(graph: &Graph) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Decode and validate a workflow document.
///
/// Schema validation rejects: a node missing `id`, `kind`, or `position`;
/// an unknown `kind`; an edge endpoint not present in the same payload;
/// duplicate node or edge ids; and wrong-typed fields. The graph is built
/// only after the whole payload validates.
pub fn decode(text: &str) -> Result<Graph, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let root = value
        .as_object()
        .ok_or_else(|| schema("top-level value must be an object"))?;
    let raw_nodes = root
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| schema("missing `nodes` array"))?;
    let raw_edges = root
        .get("edges")
        .and_then(Value::as_array)
        .ok_or_else(|| schema("missing `edges` array"))?;

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    let mut node_ids = FxHashSet::default();
    for (index, raw) in raw_nodes.iter().enumerate() {
        let node = decode_node(raw, index)?;
        if !node_ids.insert(node.id.clone()) {
            return Err(schema(format!("duplicate node id `{}`", node.id)));
        }
        nodes.push(node);
    }

    let mut edges = Vec::with_capacity(raw_edges.len());
    let mut edge_ids = FxHashSet::default();
    for (index, raw) in raw_edges.iter().enumerate() {
        let edge = decode_edge(raw, index)?;
        if !node_ids.contains(&edge.source) {
            return Err(schema(format!(
                "edge `{}` references missing node `{}`",
                edge.id, edge.source
            )));
        }
        if !node_ids.contains(&edge.target) {
            return Err(schema(format!(
                "edge `{}` references missing node `{}`",
                edge.id, edge.target
            )));
        }
        if !edge_ids.insert(edge.id.clone()) {
            return Err(schema(format!("duplicate edge id `{}`", edge.id)));
        }
        edges.push(edge);
    }

    Ok(Graph { nodes, edges })
}

fn string_field(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    what: &str,
) -> Result<String, CodecError> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(_) => Err(schema(format!("{what}: `{key}` must be a non-empty string"))),
        None => Err(schema(format!("{what}: missing `{key}`"))),
    }
}

fn coordinate(position: &serde_json::Map<String, Value>, key: &str, what: &str) -> Result<i64, CodecError> {
    position
        .get(key)
        .and_then(Value::as_f64)
        .map(|v| v.round() as i64)
        .ok_or_else(|| schema(format!("{what}: `position.{key}` must be a number")))
}

fn decode_node(raw: &Value, index: usize) -> Result<Node, CodecError> {
    let what = format!("node #{index}");
    let obj = raw
        .as_object()
        .ok_or_else(|| schema(format!("{what}: must be an object")))?;

    let id = NodeId(string_field(obj, "id", &what)?);
    let kind_str = string_field(obj, "kind", &what)?;
    let kind = BlockKind::decode(&kind_str)
        .ok_or_else(|| schema(format!("{what}: unknown kind `{kind_str}`")))?;

    let position = obj
        .get("position")
        .and_then(Value::as_object)
        .ok_or_else(|| schema(format!("{what}: missing `position`")))?;
    let position = Position {
        x: coordinate(position, "x", &what)?,
        y: coordinate(position, "y", &what)?,
    };

    let data: FxHashMap<String, Value> = match obj.get("data") {
        None => FxHashMap::default(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Some(_) => return Err(schema(format!("{what}: `data` must be an object"))),
    };

    Ok(Node {
        id,
        kind,
        position,
        data,
    })
}

fn decode_edge(raw: &Value, index: usize) -> Result<Edge, CodecError> {
    let what = format!("edge #{index}");
    let obj = raw
        .as_object()
        .ok_or_else(|| schema(format!("{what}: must be an object")))?;

    let label = match obj.get("label") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(schema(format!("{what}: `label` must be a string"))),
    };

    Ok(Edge {
        id: EdgeId(string_field(obj, "id", &what)?),
        source: NodeId(string_field(obj, "sourceNodeId", &what)?),
        target: NodeId(string_field(obj, "targetNodeId", &what)?),
        label,
    })
}
