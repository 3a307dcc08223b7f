//! Time-stepped simulation of the current workflow graph.
//!
//! The engine walks the nodes of a graph snapshot in creation order
//! (branching is advisory only, so no topological resolution is needed),
//! waits a fixed tick per node, and applies a bounded positive increment to
//! the run metrics. The walk never mutates the graph; it reads a deep copy
//! taken at [`start`](SimulationEngine::start) time.
//!
//! # Lifecycle
//!
//! `Idle -> Running -> (Completed | Cancelled)`; both terminal states admit
//! a new `start`, which resets the metrics and returns the engine to
//! `Running`. Only a live `Running` run rejects `start`, with
//! [`SimulationError::AlreadyRunning`].
//!
//! # Examples
//!
//! ```rust
//! use flowcanvas::config::SimulationConfig;
//! use flowcanvas::events::EventHub;
//! use flowcanvas::graph::Graph;
//! use flowcanvas::simulation::{SimulationEngine, SimulationStatus};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = SimulationConfig::default()
//!     .with_tick(Duration::from_millis(1))
//!     .with_seed(7);
//! let engine = SimulationEngine::new(config, EventHub::new());
//!
//! engine.start(Graph::default()).unwrap();
//! engine.wait().await;
//! assert_eq!(engine.status(), SimulationStatus::Completed);
//! # }
//! ```

mod engine;
mod metrics;

pub use engine::{SimulationEngine, SimulationError, SimulationStatus};
pub use metrics::SimulationMetrics;
