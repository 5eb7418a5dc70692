//! Convergence control across sweeps.

use tracing::{debug, info};

use crate::field::Field;
use crate::scene::BoundaryRegistry;

use super::relax::RelaxationEngine;

/// Lifecycle of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverStatus {
    /// More sweeps are needed
    #[default]
    Running,
    /// A sweep's maximum residual dropped below the threshold (terminal)
    Converged,
}

/// Snapshot of solver progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverState {
    /// Completed sweeps
    pub iteration: usize,
    /// Maximum residual of the latest sweep (0 before the first)
    pub last_max_residual: f64,
    pub status: SolverStatus,
}

impl SolverState {
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }
}

impl Default for SolverState {
    fn default() -> Self {
        Self {
            iteration: 0,
            last_max_residual: 0.0,
            status: SolverStatus::Running,
        }
    }
}

/// Maximum residual reported by one completed sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRecord {
    pub iteration: usize,
    pub max_residual: f64,
}

/// Drives sweeps and decides when to stop.
///
/// There is no iteration cap. A configuration whose residual never falls
/// below `max_error` keeps reporting [`SolverStatus::Running`].
#[derive(Debug, Clone)]
pub struct ConvergenceController {
    max_error: f64,
    state: SolverState,
    history: Vec<ErrorRecord>,
}

impl ConvergenceController {
    /// Create a controller that converges once a sweep's maximum residual
    /// is strictly below `max_error`.
    pub fn new(max_error: f64) -> Self {
        Self {
            max_error,
            state: SolverState::default(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    /// One record per completed sweep, oldest first.
    pub fn history(&self) -> &[ErrorRecord] {
        &self.history
    }

    pub fn is_converged(&self) -> bool {
        self.state.is_converged()
    }

    /// Run one sweep unless already converged, then update state and history.
    ///
    /// Calling this after convergence performs no sweep and returns the
    /// unchanged state.
    pub fn step(
        &mut self,
        engine: &RelaxationEngine,
        field: &mut Field,
        boundaries: &BoundaryRegistry,
    ) -> SolverState {
        if self.is_converged() {
            return self.state;
        }
        let max_residual = engine.sweep(field, boundaries);
        self.record(max_residual)
    }

    fn record(&mut self, max_residual: f64) -> SolverState {
        self.state.iteration += 1;
        self.state.last_max_residual = max_residual;
        self.history.push(ErrorRecord {
            iteration: self.state.iteration,
            max_residual,
        });

        if max_residual < self.max_error {
            self.state.status = SolverStatus::Converged;
            info!(
                iteration = self.state.iteration,
                max_residual, "relaxation converged"
            );
        } else {
            debug!(iteration = self.state.iteration, max_residual, "sweep complete");
        }

        self.state
    }
}
