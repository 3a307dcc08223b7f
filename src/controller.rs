//! Editor controller: the command dispatcher over the editor core.
//!
//! External UI events arrive as [`EditorCommand`] messages; the controller
//! translates each into store mutations, history pushes, and
//! [`EditorEvent`](crate::events::EditorEvent) notifications. It owns no
//! durable state of its own beyond the transient selection and drag
//! session: the graph lives in the store, versions in the history, run
//! metrics in the simulation engine.
//!
//! A new controller seeds its graph with one trigger node and records that
//! as the initial history snapshot.
//!
//! # Quick Start
//!
//! ```rust
//! use flowcanvas::blocks::BlockKind;
//! use flowcanvas::controller::{CommandOutcome, EditorCommand, EditorController};
//! use flowcanvas::placement::ScreenPoint;
//!
//! let mut editor = EditorController::default();
//! let trigger = editor.graph().nodes[0].id.clone();
//!
//! let action = match editor
//!     .dispatch(EditorCommand::PlaceNode {
//!         kind: BlockKind::Action,
//!         at: ScreenPoint { x: 100.0, y: 100.0 },
//!     })
//!     .unwrap()
//! {
//!     CommandOutcome::Node(node) => node,
//!     other => panic!("unexpected outcome: {other:?}"),
//! };
//!
//! editor
//!     .dispatch(EditorCommand::Connect { source: trigger, target: action.id })
//!     .unwrap();
//! assert_eq!(editor.graph().edges.len(), 1);
//! ```

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde_json::Value;
use thiserror::Error;

use crate::blocks::{BlockKind, BlockRegistry};
use crate::codec;
use crate::codec::CodecError;
use crate::config::EditorConfig;
use crate::events::{EditorEvent, EventHub};
use crate::graph::{Edge, GraphError, GraphStore, Node, NodeId, Position};
use crate::history::{HistoryManager, SnapshotId};
use crate::placement::{DragSession, ScreenPoint, Viewport, snap_to_grid, to_canvas};
use crate::simulation::{SimulationEngine, SimulationError};

/// The UI command surface, abstracted from concrete input devices.
#[derive(Clone, Debug)]
pub enum EditorCommand {
    /// Place a new node of `kind` with its center under the screen point.
    PlaceNode { kind: BlockKind, at: ScreenPoint },
    /// Begin dragging a block from the palette.
    DragStart { kind: BlockKind },
    /// Pointer moved over the canvas during a drag.
    DragOver { at: ScreenPoint },
    /// Complete the drag; commits a placement if a drag was live.
    Drop { at: ScreenPoint },
    /// Connect two existing nodes.
    Connect { source: NodeId, target: NodeId },
    /// Select a node, or clear the selection.
    Select(Option<NodeId>),
    /// Set one key of a node's data map (config-panel edit).
    EditField {
        node: NodeId,
        key: String,
        value: Value,
    },
    /// Duplicate a node with the configured offset.
    Duplicate(NodeId),
    /// Delete a node, cascading to its incident edges.
    Delete(NodeId),
    /// Step the history cursor back.
    Undo,
    /// Step the history cursor forward.
    Redo,
    /// Record the current graph as a labeled version.
    SaveVersion { label: String },
    /// Jump the history cursor to a stored version.
    RestoreVersion(SnapshotId),
    /// Export the current graph as pretty-printed workflow JSON.
    ExportJson,
    /// Import a workflow JSON document, replacing the current graph.
    ImportJson(String),
    /// Start a simulation run over the current graph.
    RunSimulation,
    /// Cancel the live simulation run.
    CancelSimulation,
}

/// What a dispatched command produced.
#[derive(Clone, Debug)]
pub enum CommandOutcome {
    /// The command applied with nothing to hand back.
    Done,
    /// The command was a recoverable no-op at a boundary (undo at the
    /// oldest snapshot, drop without a drag, cancel with nothing running).
    /// Surfaced as a disabled control, never as an error.
    Boundary,
    /// A node was created.
    Node(Node),
    /// An edge was created.
    Edge(Edge),
    /// Exported JSON text for the clipboard sink.
    Json(String),
}

/// Errors surfaced by command dispatch.
///
/// Every variant is recoverable and leaves the editor state unchanged; the
/// embedding UI shows them as notifications.
#[derive(Debug, Error, Diagnostic)]
pub enum EditorError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Simulation(#[from] SimulationError),
}

/// Orchestrates the store, history, placement, codec, and simulation in
/// response to UI commands.
pub struct EditorController {
    config: EditorConfig,
    registry: BlockRegistry,
    store: GraphStore,
    history: HistoryManager,
    drag: DragSession,
    viewport: Viewport,
    selection: Option<NodeId>,
    simulation: SimulationEngine,
    events: EventHub,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(EditorConfig::default(), BlockRegistry::default())
    }
}

impl EditorController {
    /// Build a controller with an injected configuration and block catalog.
    ///
    /// The graph is born with one seed trigger node, recorded as the
    /// initial history snapshot.
    #[must_use]
    pub fn new(config: EditorConfig, registry: BlockRegistry) -> Self {
        let mut store = GraphStore::new();
        let seed_position = snap_to_grid(Position { x: 120, y: 80 }, config.grid);
        store.add_node(
            BlockKind::Trigger,
            seed_position,
            registry.default_data(BlockKind::Trigger),
        );
        let history = HistoryManager::new(store.snapshot(), "initial", config.history_capacity);
        let events = EventHub::new();
        let simulation = SimulationEngine::new(config.simulation.clone(), events.clone());
        Self {
            config,
            registry,
            store,
            history,
            drag: DragSession::default(),
            viewport: Viewport::default(),
            selection: None,
            simulation,
            events,
        }
    }

    /// Read-only view of the current graph.
    pub fn graph(&self) -> &crate::graph::Graph {
        self.store.graph()
    }

    /// The version history (snapshot list + cursor).
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// The simulation engine, for status and metrics reads.
    pub fn simulation(&self) -> &SimulationEngine {
        &self.simulation
    }

    /// Currently selected node, if any.
    pub fn selection(&self) -> Option<&NodeId> {
        self.selection.as_ref()
    }

    /// Subscribe to editor events.
    pub fn subscribe(&self) -> flume::Receiver<EditorEvent> {
        self.events.subscribe()
    }

    /// Inform the controller of the canvas pan/zoom state. Placement math
    /// uses the most recent viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Dispatch one UI command.
    pub fn dispatch(&mut self, command: EditorCommand) -> Result<CommandOutcome, EditorError> {
        tracing::debug!(?command, "dispatch");
        match command {
            EditorCommand::PlaceNode { kind, at } => self.place(kind, at),
            EditorCommand::DragStart { kind } => {
                self.drag.start(kind);
                Ok(CommandOutcome::Done)
            }
            EditorCommand::DragOver { at } => {
                self.drag.over(at);
                Ok(CommandOutcome::Done)
            }
            EditorCommand::Drop { at } => match self.drag.drop(at) {
                Some((kind, point)) => self.place(kind, point),
                None => {
                    tracing::warn!("drop without a live drag session");
                    Ok(CommandOutcome::Boundary)
                }
            },
            EditorCommand::Connect { source, target } => {
                let edge = self.store.add_edge(source, target, None)?;
                self.commit("connect");
                Ok(CommandOutcome::Edge(edge))
            }
            EditorCommand::Select(node) => {
                self.selection = node.clone();
                self.events.emit(EditorEvent::SelectionChanged(node));
                Ok(CommandOutcome::Done)
            }
            EditorCommand::EditField { node, key, value } => {
                let mut patch = FxHashMap::default();
                patch.insert(key, value);
                self.store.update_node_data(&node, patch)?;
                self.commit("edit field");
                Ok(CommandOutcome::Done)
            }
            EditorCommand::Duplicate(node) => {
                let copy = self
                    .store
                    .duplicate_node(&node, self.config.duplicate_offset)?;
                self.commit("duplicate node");
                Ok(CommandOutcome::Node(copy))
            }
            EditorCommand::Delete(node) => {
                self.store.delete_node(&node)?;
                if self.selection.as_ref() == Some(&node) {
                    self.selection = None;
                    self.events.emit(EditorEvent::SelectionChanged(None));
                }
                self.commit("delete node");
                Ok(CommandOutcome::Done)
            }
            EditorCommand::Undo => self.move_cursor(|history| history.undo()),
            EditorCommand::Redo => self.move_cursor(|history| history.redo()),
            EditorCommand::SaveVersion { label } => {
                let snapshot = self.history.push(self.store.snapshot(), label);
                self.events
                    .emit(EditorEvent::HistoryMoved(snapshot.id.clone()));
                Ok(CommandOutcome::Done)
            }
            EditorCommand::RestoreVersion(id) => {
                self.move_cursor(move |history| history.restore(&id))
            }
            EditorCommand::ExportJson => {
                Ok(CommandOutcome::Json(codec::encode_pretty(self.store.graph())?))
            }
            EditorCommand::ImportJson(text) => {
                // decode is all-or-nothing: the store is only touched once
                // the whole payload has validated.
                let graph = codec::decode(&text)?;
                self.store.load(graph);
                self.commit("import");
                Ok(CommandOutcome::Done)
            }
            EditorCommand::RunSimulation => {
                self.simulation.start(self.store.snapshot())?;
                Ok(CommandOutcome::Done)
            }
            EditorCommand::CancelSimulation => {
                if self.simulation.cancel() {
                    Ok(CommandOutcome::Done)
                } else {
                    Ok(CommandOutcome::Boundary)
                }
            }
        }
    }

    fn place(&mut self, kind: BlockKind, at: ScreenPoint) -> Result<CommandOutcome, EditorError> {
        let position = snap_to_grid(
            to_canvas(at, &self.viewport, self.config.drop_anchor),
            self.config.grid,
        );
        let node = self
            .store
            .add_node(kind, position, self.registry.default_data(kind));
        self.commit("place node");
        Ok(CommandOutcome::Node(node))
    }

    /// Record a committed mutation: snapshot push, then notify.
    fn commit(&mut self, label: &str) {
        self.history.push(self.store.snapshot(), label);
        self.events.emit(EditorEvent::GraphChanged);
    }

    /// Shared path for undo/redo/restore: move the cursor, load the graph
    /// it points at, notify. A boundary no-op emits nothing.
    fn move_cursor<F>(&mut self, step: F) -> Result<CommandOutcome, EditorError>
    where
        F: FnOnce(&mut HistoryManager) -> Option<&crate::graph::Graph>,
    {
        let Some(graph) = step(&mut self.history).cloned() else {
            return Ok(CommandOutcome::Boundary);
        };
        self.store.load(graph);
        self.events
            .emit(EditorEvent::HistoryMoved(self.history.current().id.clone()));
        self.events.emit(EditorEvent::GraphChanged);
        Ok(CommandOutcome::Done)
    }
}
