//! SOR relaxation solver.
//!
//! This module provides the numerical engine of the crate.
//!
//! ## Successive over-relaxation
//!
//! The steady-state potential satisfies Laplace's equation, discretised on a
//! uniform grid with the 5-point stencil:
//!
//! ```text
//!             p[i,j-1]
//! p[i-1,j]  -4 p[i,j]  p[i+1,j]   = 0
//!             p[i,j+1]
//! ```
//!
//! Each sweep visits every sample once and moves it toward the mean of its
//! neighbours:
//!
//! ```text
//! r        = (p[i+1,j] + p[i-1,j] + p[i,j+1] + p[i,j-1]) / 4 - p[i,j]
//! p[i,j]  += omega * r
//! ```
//!
//! Samples inside a boundary region are pinned to the region's potential and
//! everything outside the grid counts as grounded (potential 0).
//!
//! ## Driving a solve
//!
//! A [`Session`] bundles the field, boundaries and convergence state. Hosts
//! call [`Session::run_one_sweep`] repeatedly, which lets a single-threaded
//! host interleave rendering between sweeps.

mod controller;
mod relax;
mod session;

pub use controller::{ConvergenceController, ErrorRecord, SolverState, SolverStatus};
pub use relax::{RelaxationEngine, GROUND_POTENTIAL};
pub use session::{Session, SessionConfig};
