//! Editor configuration.
//!
//! Tunable constants for placement, history, and the simulation engine.
//! Defaults mirror the product canvas; embedders override individual knobs
//! with the `with_*` builders.

use std::time::Duration;

use crate::graph::Position;

/// Configuration for the editor core.
///
/// # Examples
///
/// ```rust
/// use flowcanvas::config::EditorConfig;
/// use std::time::Duration;
///
/// let config = EditorConfig::default()
///     .with_grid(10)
///     .with_simulation_tick(Duration::from_millis(5));
/// assert_eq!(config.grid, 10);
/// ```
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Grid cell size in canvas units; every node position is a multiple.
    pub grid: i64,
    /// Offset subtracted after the viewport inverse transform so the
    /// dropped node's visual center lands under the pointer.
    pub drop_anchor: (f64, f64),
    /// Fixed delta applied to a duplicated node's position.
    pub duplicate_offset: Position,
    /// Maximum retained snapshots; the oldest are dropped beyond this.
    pub history_capacity: usize,
    /// Simulation engine knobs.
    pub simulation: SimulationConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: 20,
            drop_anchor: (60.0, 20.0),
            duplicate_offset: Position { x: 40, y: 40 },
            history_capacity: 256,
            simulation: SimulationConfig::default(),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_grid(mut self, grid: i64) -> Self {
        self.grid = grid.max(1);
        self
    }

    #[must_use]
    pub fn with_drop_anchor(mut self, anchor: (f64, f64)) -> Self {
        self.drop_anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_duplicate_offset(mut self, offset: Position) -> Self {
        self.duplicate_offset = offset;
        self
    }

    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    #[must_use]
    pub fn with_simulation_tick(mut self, tick: Duration) -> Self {
        self.simulation.tick = tick;
        self
    }
}

/// Knobs for the time-stepped simulation walk.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Fixed delay before each node's metric increment is applied.
    pub tick: Duration,
    /// Seed for the increment RNG; `Some` makes a run fully deterministic.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(400),
            seed: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
