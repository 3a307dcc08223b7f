//! Placement math and the drag state machine.
//!
//! Converts pointer/viewport coordinates into canvas coordinates and
//! quantizes them to the grid. Everything here is pure and
//! framework-agnostic: the rendering layer feeds in screen points and a
//! [`Viewport`], and gets back grid-aligned [`Position`]s.
//!
//! # Examples
//!
//! ```rust
//! use flowcanvas::graph::Position;
//! use flowcanvas::placement::{ScreenPoint, Viewport, snap_to_grid, to_canvas};
//!
//! let viewport = Viewport { pan_x: 50.0, pan_y: 0.0, zoom: 2.0 };
//! let canvas = to_canvas(ScreenPoint { x: 250.0, y: 80.0 }, &viewport, (0.0, 0.0));
//! assert_eq!(canvas, Position { x: 100, y: 40 });
//!
//! // Snapping is idempotent.
//! let snapped = snap_to_grid(Position { x: 107, y: 33 }, 20);
//! assert_eq!(snapped, Position { x: 100, y: 40 });
//! assert_eq!(snap_to_grid(snapped, 20), snapped);
//! ```

use serde::{Deserialize, Serialize};

use crate::blocks::BlockKind;
use crate::graph::Position;

/// A pointer position in screen (device) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// The current pan/zoom transform of the canvas viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Convert a screen point to canvas coordinates.
///
/// Applies the inverse of the viewport transform, then subtracts the fixed
/// `anchor` offset so the dropped node's visual center (not its corner)
/// lands under the pointer. Zoom values at or below zero are treated as 1.
pub fn to_canvas(point: ScreenPoint, viewport: &Viewport, anchor: (f64, f64)) -> Position {
    let zoom = if viewport.zoom > 0.0 { viewport.zoom } else { 1.0 };
    let x = (point.x - viewport.pan_x) / zoom - anchor.0;
    let y = (point.y - viewport.pan_y) / zoom - anchor.1;
    Position {
        x: x.round() as i64,
        y: y.round() as i64,
    }
}

/// Quantize a position to the grid, component-wise
/// `round(value / grid) * grid`.
///
/// Applied to every node placement and every drag-move, which guarantees
/// all node positions are grid-aligned at rest. Idempotent by construction.
pub fn snap_to_grid(position: Position, grid: i64) -> Position {
    let grid = grid.max(1);
    let snap = |v: i64| ((v as f64 / grid as f64).round() as i64) * grid;
    Position {
        x: snap(position.x),
        y: snap(position.y),
    }
}

/// Transient drag-and-drop state.
///
/// Native drag events are abstracted into three explicit messages:
/// [`start`](Self::start), [`over`](Self::over), and
/// [`drop`](Self::drop). A session that never reaches `drop` leaves no
/// trace anywhere in the editor; only a completed drop commits a placement.
#[derive(Clone, Debug, Default)]
pub struct DragSession {
    state: DragState,
}

#[derive(Clone, Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        kind: BlockKind,
        last: Option<ScreenPoint>,
    },
}

impl DragSession {
    /// Begin dragging a block of the given kind from the palette. Restarts
    /// the session if one was already live.
    pub fn start(&mut self, kind: BlockKind) {
        self.state = DragState::Dragging { kind, last: None };
    }

    /// Record the pointer passing over the canvas. Ignored when idle.
    pub fn over(&mut self, point: ScreenPoint) {
        if let DragState::Dragging { last, .. } = &mut self.state {
            *last = Some(point);
        }
    }

    /// Complete the drag. Returns the dragged kind and the drop point and
    /// resets to idle; returns `None` if no drag was in progress.
    pub fn drop(&mut self, point: ScreenPoint) -> Option<(BlockKind, ScreenPoint)> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { kind, .. } => Some((kind, point)),
        }
    }

    /// Abandon the drag without committing anything.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Returns the kind being dragged, if a session is live.
    pub fn dragging(&self) -> Option<BlockKind> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { kind, .. } => Some(*kind),
        }
    }
}
