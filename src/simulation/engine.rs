//! The simulation engine: lifecycle, tick loop, and cancellation.

use std::sync::{Arc, Mutex};

use miette::Diagnostic;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::metrics::SimulationMetrics;
use crate::config::SimulationConfig;
use crate::events::{EditorEvent, EventHub};
use crate::graph::Graph;

/// Errors produced by the simulation engine.
#[derive(Debug, Error, Diagnostic)]
pub enum SimulationError {
    /// `start` was called while a run is live.
    #[error("a simulation run is already in progress")]
    #[diagnostic(
        code(flowcanvas::simulation::already_running),
        help("Cancel the current run or wait for it to complete before starting another.")
    )]
    AlreadyRunning,
}

/// Lifecycle of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationStatus {
    /// No run has happened yet, or the engine was reset.
    #[default]
    Idle,
    /// A run is ticking.
    Running,
    /// The last run walked every node.
    Completed,
    /// The last run was cancelled; metrics up to that point are retained.
    Cancelled,
}

struct RunState {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

/// Time-stepped walker over a graph snapshot.
///
/// At most one run is live at a time, and within a run at most one tick is
/// pending: the loop awaits each tick delay before applying the next
/// increment, so ticks are never concurrent with each other.
pub struct SimulationEngine {
    config: SimulationConfig,
    metrics: Arc<Mutex<SimulationMetrics>>,
    status: Arc<Mutex<SimulationStatus>>,
    events: EventHub,
    run: Mutex<Option<RunState>>,
}

impl SimulationEngine {
    #[must_use]
    pub fn new(config: SimulationConfig, events: EventHub) -> Self {
        Self {
            config,
            metrics: Arc::new(Mutex::new(SimulationMetrics::default())),
            status: Arc::new(Mutex::new(SimulationStatus::default())),
            events,
            run: Mutex::new(None),
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SimulationStatus {
        *self.status.lock().expect("status poisoned")
    }

    /// Shared read of the run metrics (progress display during `Running`).
    pub fn metrics(&self) -> SimulationMetrics {
        *self.metrics.lock().expect("metrics poisoned")
    }

    /// Start a run over a graph snapshot.
    ///
    /// Resets the metrics, transitions to `Running`, and spawns the tick
    /// loop on the current tokio runtime. Rejects with
    /// [`SimulationError::AlreadyRunning`] while a run is live.
    pub fn start(&self, graph: Graph) -> Result<(), SimulationError> {
        {
            let mut status = self.status.lock().expect("status poisoned");
            if *status == SimulationStatus::Running {
                return Err(SimulationError::AlreadyRunning);
            }
            *status = SimulationStatus::Running;
        }
        *self.metrics.lock().expect("metrics poisoned") = SimulationMetrics::default();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let tick = self.config.tick;
        let seed = self.config.seed;
        let metrics = Arc::clone(&self.metrics);
        let status = Arc::clone(&self.status);
        let events = self.events.clone();

        tracing::info!(nodes = graph.nodes.len(), ?tick, "simulation started");
        events.emit(EditorEvent::SimulationStarted);

        let handle = tokio::spawn(async move {
            let mut rng: StdRng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut cancelled = false;
            for node in &graph.nodes {
                // Biased select: once cancel has fired, no further tick may
                // be applied even if the timer has also elapsed.
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => {
                        cancelled = true;
                        break;
                    }
                    _ = tokio::time::sleep(tick) => {
                        let snapshot = {
                            let mut m = metrics.lock().expect("metrics poisoned");
                            m.bump(
                                rng.random_range(0.01..0.05),
                                rng.random_range(0.005..0.03),
                            );
                            *m
                        };
                        tracing::debug!(node = %node.id, ctr = snapshot.ctr, "simulation tick");
                        events.emit(EditorEvent::SimulationTick {
                            node: node.id.clone(),
                            metrics: snapshot,
                        });
                    }
                }
            }
            let final_status = if cancelled {
                SimulationStatus::Cancelled
            } else {
                SimulationStatus::Completed
            };
            *status.lock().expect("status poisoned") = final_status;
            let final_metrics = *metrics.lock().expect("metrics poisoned");
            tracing::info!(?final_status, "simulation ended");
            events.emit(EditorEvent::SimulationFinished {
                cancelled,
                metrics: final_metrics,
            });
        });

        *self.run.lock().expect("run slot poisoned") = Some(RunState {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        });
        Ok(())
    }

    /// Cancel the live run.
    ///
    /// Returns `true` if a running run was told to stop; `false` when
    /// nothing was running (a recoverable no-op). Metrics accumulated so
    /// far are retained, not rolled back.
    pub fn cancel(&self) -> bool {
        if self.status() != SimulationStatus::Running {
            return false;
        }
        let mut run = self.run.lock().expect("run slot poisoned");
        match run.as_mut().and_then(|r| r.shutdown_tx.take()) {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Await the end of the current run, if one was started.
    pub async fn wait(&self) {
        let handle = {
            let mut run = self.run.lock().expect("run slot poisoned");
            run.as_mut().and_then(|r| r.handle.take())
        };
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
