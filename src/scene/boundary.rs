//! Ordered registry of fixed-potential regions.

use crate::error::Result;

use super::types::{Coordinate, Rect, RegionSpec};

/// Dirichlet boundary regions in registration order.
///
/// Overlaps are resolved by order alone: the first registered region that
/// contains a point decides its potential.
#[derive(Debug, Clone, Default)]
pub struct BoundaryRegistry {
    regions: Vec<Rect>,
}

impl BoundaryRegistry {
    /// Validate every spec and build the registry.
    ///
    /// Fails on the first region whose corners are out of order; nothing is
    /// registered in that case.
    pub fn from_specs(specs: &[RegionSpec]) -> Result<Self> {
        let regions = specs.iter().map(Rect::from_spec).collect::<Result<Vec<_>>>()?;
        Ok(Self { regions })
    }

    /// Potential of the first region containing `c`, if any.
    pub fn classify(&self, c: Coordinate) -> Option<f64> {
        self.regions
            .iter()
            .find(|r| r.contains(c))
            .map(Rect::potential)
    }

    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
