//! # Flowcanvas: Workflow Canvas Editor Core
//!
//! Flowcanvas is the engine behind a visual automation builder: a mutable
//! directed-graph model with drag-and-drop placement, connection
//! management, a linear version history with undo/redo, a canonical JSON
//! interchange format, and a time-stepped simulation that walks the graph
//! and accumulates metrics. It is deliberately rendering-agnostic: a UI
//! layer feeds in [`EditorCommand`](controller::EditorCommand) messages and
//! subscribes to [`EditorEvent`](events::EditorEvent)s.
//!
//! ## Core Concepts
//!
//! - **Blocks**: The static catalog of node kinds (trigger, wait, action,
//!   decision, tag, notify) with default data templates
//! - **Graph**: The canonical node/edge collections with referential
//!   invariants (no dangling edges, unique ids)
//! - **History**: Append-only snapshots with an undo/redo cursor
//! - **Codec**: Canonical JSON encode/decode with schema validation
//! - **Simulation**: Timer-driven walk producing incremental metrics
//! - **Controller**: The command dispatcher orchestrating all of the above
//!
//! ## Quick Start
//!
//! ```rust
//! use flowcanvas::blocks::BlockKind;
//! use flowcanvas::controller::{CommandOutcome, EditorCommand, EditorController};
//! use flowcanvas::placement::ScreenPoint;
//!
//! // A new editor starts with a single seed trigger node.
//! let mut editor = EditorController::default();
//! assert_eq!(editor.graph().nodes.len(), 1);
//!
//! // Drag a block from the palette and drop it on the canvas.
//! editor.dispatch(EditorCommand::DragStart { kind: BlockKind::Wait }).unwrap();
//! let outcome = editor
//!     .dispatch(EditorCommand::Drop { at: ScreenPoint { x: 300.0, y: 160.0 } })
//!     .unwrap();
//! assert!(matches!(outcome, CommandOutcome::Node(_)));
//!
//! // Every committed mutation is undoable.
//! editor.dispatch(EditorCommand::Undo).unwrap();
//! assert_eq!(editor.graph().nodes.len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! All errors are recoverable and leave the editor state unchanged; they
//! derive `miette::Diagnostic` for rich reporting. Boundary no-ops (undo
//! at the oldest snapshot, cancel with nothing running) are
//! [`CommandOutcome::Boundary`](controller::CommandOutcome::Boundary), not
//! errors; surface them as disabled controls.
//!
//! ## Module Guide
//!
//! - [`blocks`] - Block kinds, specs, and the injected registry
//! - [`graph`] - Graph model types and the invariant-enforcing store
//! - [`placement`] - Viewport math, grid snapping, drag state machine
//! - [`history`] - Version snapshots and the undo/redo cursor
//! - [`codec`] - Workflow JSON encode/decode with schema validation
//! - [`simulation`] - The time-stepped metric walk
//! - [`controller`] - Command dispatch over the whole core
//! - [`events`] - Subscriber fan-out for rendering layers
//! - [`config`] - Tunable constants
//! - [`telemetry`] - Tracing subscriber setup for embedders

pub mod blocks;
pub mod codec;
pub mod config;
pub mod controller;
pub mod events;
pub mod graph;
pub mod history;
pub mod placement;
pub mod simulation;
pub mod telemetry;
