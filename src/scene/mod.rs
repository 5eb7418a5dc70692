//! Scene setup: geometry, boundary regions and tunables.
//!
//! This module holds everything that is fixed before the first sweep.
//! A [`Scene`] is built once (from the scene DSL or programmatically),
//! validated, and then turned into a [`BoundaryRegistry`] and a
//! [`CoordinateMapper`] for the solver session.

mod boundary;
mod mapper;
mod setup;
mod types;
mod validate;

pub use boundary::BoundaryRegistry;
pub use mapper::CoordinateMapper;
pub use setup::Scene;
pub use types::{Coordinate, Rect, RegionSpec};
pub use validate::validate_scene;
