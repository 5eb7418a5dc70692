//! # Relax Core
//!
//! A steady-state potential solver for 2D rectangular domains.
//!
//! This library provides:
//! - A small DSL for describing scenes (grid, window, fixed-potential regions)
//! - Successive over-relaxation (SOR) of Laplace's equation on a uniform grid
//! - A step-at-a-time session API for hosts that render while solving
//! - Heatmap rendering of the potential field
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the scene description language
//! - [`scene`] - Coordinates, boundary regions and scene validation
//! - [`field`] - The grid of potential samples
//! - [`solver`] - Relaxation sweep, convergence control and sessions
//! - [`render`] - Heatmap color mapping
//! - [`output`] - Field and error-history writers (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! relax plates.scn --history errors.csv > field.ppm
//! ```
//!
//! ### Library
//!
//! ```
//! use relax_core::scene::{Coordinate, RegionSpec, Scene};
//! use relax_core::Session;
//!
//! let scene = Scene::new(40, 25)
//!     .with_center(Coordinate::new(15.0, 0.0))
//!     .with_scale(50.0)
//!     .with_region(RegionSpec::new(
//!         "anode",
//!         Coordinate::new(-5.0, 5.0),
//!         Coordinate::new(5.0, -5.0),
//!         100.0,
//!     ));
//!
//! let mut session = Session::new(scene)?;
//! while !session.run_one_sweep().is_converged() {
//!     // repaint, plot session.history(), ...
//! }
//! # Ok::<(), relax_core::RelaxError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmRelaxSim } from 'relax_core';
//!
//! const sim = new WasmRelaxSim(sceneDsl);
//! while (!sim.step()) { /* yield to the event loop */ }
//! ```
//!
//! ## Solution Method
//!
//! Each sweep visits every sample in a fixed order (ascending `i`, then
//! ascending `j`) and updates it in place:
//!
//! 1. Samples inside a boundary region are set to that region's potential
//! 2. Other samples move by `omega` times their 5-point Laplacian residual,
//!    with everything outside the grid held at 0
//!
//! The solve stops once a sweep's maximum residual falls below the
//! configured threshold.

pub mod dsl;
pub mod error;
pub mod field;
pub mod render;
pub mod scene;
pub mod solver;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use error::{RelaxError, Result};
pub use field::Field;
pub use scene::Scene;
pub use solver::Session;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmRelaxSim;

/// Default display size in pixels
pub const DEFAULT_VIEWPORT: (usize, usize) = (800, 500);

/// Default display pixels per sample
pub const DEFAULT_DOWNSAMPLE: usize = 2;

/// Default window center in domain space
pub const DEFAULT_CENTER: scene::Coordinate = scene::Coordinate::new(15.0, 0.0);

/// Default window width in domain units
pub const DEFAULT_SCALE: f64 = 50.0;

/// Default SOR relaxation factor
pub const DEFAULT_OMEGA: f64 = 1.9;

/// Default convergence threshold
pub const DEFAULT_MAX_ERROR: f64 = 0.1;

/// Default heatmap full-scale potential
pub const DEFAULT_MAX_POTENTIAL: f64 = 100_000.0;
