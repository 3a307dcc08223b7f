//! Block catalog for the workflow canvas.
//!
//! This module defines the fundamental vocabulary of the editor: the set of
//! block *kinds* a workflow node can have, the display metadata attached to
//! each kind, and the registry the controller consults when a new node is
//! placed on the canvas.
//!
//! # Key Types
//!
//! - [`BlockKind`]: Identifies the type of a workflow node
//! - [`BlockSpec`]: Immutable display metadata and default data for a kind
//! - [`BlockRegistry`]: The injected catalog of all available kinds
//!
//! # Examples
//!
//! ```rust
//! use flowcanvas::blocks::{BlockKind, BlockRegistry};
//!
//! let registry = BlockRegistry::default();
//! let spec = registry.spec(BlockKind::Wait);
//! assert_eq!(spec.label, "Wait");
//! assert!(spec.default_data.contains_key("time"));
//!
//! // Encode for interchange
//! assert_eq!(BlockKind::Decision.encode(), "decision");
//! assert_eq!(BlockKind::decode("decision"), Some(BlockKind::Decision));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Identifies the type of a block within a workflow graph.
///
/// Every node on the canvas carries exactly one `BlockKind`, and the kind
/// determines which default data template the node starts with (a wait
/// block carries `time` + `unit`, a decision block carries `condition`,
/// and so on).
///
/// The wire form used by the workflow JSON contract is the lowercase kind
/// name; see [`encode`](Self::encode) and [`decode`](Self::decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Entry point that starts a workflow run (e.g. "contact subscribed").
    Trigger,
    /// Pause for a configured duration before the next step.
    Wait,
    /// Perform a side effect such as sending a campaign email.
    Action,
    /// Advisory branch point carrying a condition expression.
    Decision,
    /// Attach a tag to the contact passing through.
    Tag,
    /// Notify an operator or external channel.
    Notify,
}

impl BlockKind {
    /// All kinds in catalog order. The order is the one shown in the block
    /// palette and is stable across releases.
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Trigger,
        BlockKind::Wait,
        BlockKind::Action,
        BlockKind::Decision,
        BlockKind::Tag,
        BlockKind::Notify,
    ];

    /// Encode a kind into its wire string form.
    ///
    /// ```rust
    /// # use flowcanvas::blocks::BlockKind;
    /// assert_eq!(BlockKind::Trigger.encode(), "trigger");
    /// ```
    #[must_use]
    pub fn encode(&self) -> &'static str {
        match self {
            BlockKind::Trigger => "trigger",
            BlockKind::Wait => "wait",
            BlockKind::Action => "action",
            BlockKind::Decision => "decision",
            BlockKind::Tag => "tag",
            BlockKind::Notify => "notify",
        }
    }

    /// Decode a wire string back into a kind.
    ///
    /// Returns `None` for strings outside the catalog; the codec turns that
    /// into a schema error rather than guessing.
    pub fn decode(s: &str) -> Option<Self> {
        match s {
            "trigger" => Some(BlockKind::Trigger),
            "wait" => Some(BlockKind::Wait),
            "action" => Some(BlockKind::Action),
            "decision" => Some(BlockKind::Decision),
            "tag" => Some(BlockKind::Tag),
            "notify" => Some(BlockKind::Notify),
            _ => None,
        }
    }

    /// Returns `true` if this is a [`Trigger`](Self::Trigger) block.
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        matches!(self, Self::Trigger)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode())
    }
}

/// Immutable catalog entry describing one block kind.
///
/// `BlockSpec` carries what the palette needs to render a draggable block
/// and the `data` template a freshly placed node is seeded with. Specs live
/// only inside a [`BlockRegistry`]; nodes copy the template, they never
/// reference the spec.
#[derive(Clone, Debug)]
pub struct BlockSpec {
    pub kind: BlockKind,
    /// Human-readable palette label.
    pub label: &'static str,
    /// Hex accent color used by the rendering layer.
    pub color: &'static str,
    /// Icon identifier understood by the rendering layer.
    pub icon: &'static str,
    /// Template for a new node's `data` map. Always contains `label`.
    pub default_data: FxHashMap<String, Value>,
}

/// Static catalog of the block kinds available to the editor.
///
/// The registry is injected into the
/// [`EditorController`](crate::controller::EditorController) at
/// construction; the default catalog mirrors the product's automation
/// palette. The catalog is complete over [`BlockKind::ALL`] so lookups are
/// infallible.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    specs: FxHashMap<BlockKind, BlockSpec>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        let entries = [
            spec(BlockKind::Trigger, "Trigger", "#7c5cff", "bolt", &[]),
            spec(
                BlockKind::Wait,
                "Wait",
                "#f5a623",
                "clock",
                &[("time", json!(1)), ("unit", json!("days"))],
            ),
            spec(BlockKind::Action, "Send email", "#19b787", "mail", &[]),
            spec(
                BlockKind::Decision,
                "Decision",
                "#3e8bff",
                "branch",
                &[("condition", json!("opened_email"))],
            ),
            spec(
                BlockKind::Tag,
                "Add tag",
                "#e25563",
                "tag",
                &[("tag", json!("engaged"))],
            ),
            spec(
                BlockKind::Notify,
                "Notify team",
                "#9b59b6",
                "bell",
                &[("channel", json!("email"))],
            ),
        ];
        Self {
            specs: entries.into_iter().map(|s| (s.kind, s)).collect(),
        }
    }
}

impl BlockRegistry {
    /// Look up the spec for a kind.
    pub fn spec(&self, kind: BlockKind) -> &BlockSpec {
        // The catalog covers every BlockKind variant.
        &self.specs[&kind]
    }

    /// Clone the default `data` template for a kind, ready to attach to a
    /// new node.
    pub fn default_data(&self, kind: BlockKind) -> FxHashMap<String, Value> {
        self.spec(kind).default_data.clone()
    }

    /// Iterate specs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BlockSpec> {
        BlockKind::ALL.iter().map(|k| self.spec(*k))
    }
}

fn spec(
    kind: BlockKind,
    label: &'static str,
    color: &'static str,
    icon: &'static str,
    extra: &[(&str, Value)],
) -> BlockSpec {
    let mut default_data = FxHashMap::default();
    default_data.insert("label".to_string(), json!(label));
    for (key, value) in extra {
        default_data.insert((*key).to_string(), value.clone());
    }
    BlockSpec {
        kind,
        label,
        color,
        icon,
        default_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_kind() {
        let registry = BlockRegistry::default();
        for kind in BlockKind::ALL {
            let spec = registry.spec(kind);
            assert_eq!(spec.kind, kind);
            assert!(spec.default_data.contains_key("label"));
        }
        assert_eq!(registry.iter().count(), BlockKind::ALL.len());
    }

    #[test]
    fn encode_decode_round_trip() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::decode(kind.encode()), Some(kind));
        }
        assert_eq!(BlockKind::decode("teleport"), None);
    }

    #[test]
    fn wait_template_carries_duration_fields() {
        let registry = BlockRegistry::default();
        let data = registry.default_data(BlockKind::Wait);
        assert_eq!(data.get("time"), Some(&json!(1)));
        assert_eq!(data.get("unit"), Some(&json!("days")));
    }
}
