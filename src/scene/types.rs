//! Core geometric types for scene setup.

use std::fmt;

use crate::error::{RelaxError, Result};

/// A point in domain space.
///
/// Domain `y` grows upward, unlike grid rows which grow downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// An unvalidated boundary region as supplied by the scene description.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSpec {
    /// Region name (used in error messages)
    pub name: String,
    /// Top-left corner (lower x, higher y)
    pub tl: Coordinate,
    /// Bottom-right corner (higher x, lower y)
    pub br: Coordinate,
    /// Fixed potential inside the region
    pub potential: f64,
    /// Source line number, 0 for programmatic regions
    pub line: usize,
}

impl RegionSpec {
    /// Create a region spec that did not come from a scene file.
    pub fn new(name: impl Into<String>, tl: Coordinate, br: Coordinate, potential: f64) -> Self {
        Self {
            name: name.into(),
            tl,
            br,
            potential,
            line: 0,
        }
    }
}

/// A validated, axis-aligned fixed-potential rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    name: String,
    tl: Coordinate,
    br: Coordinate,
    potential: f64,
}

impl Rect {
    /// Create a rectangle, checking `tl.x <= br.x` and `tl.y >= br.y`.
    pub fn new(
        name: impl Into<String>,
        tl: Coordinate,
        br: Coordinate,
        potential: f64,
    ) -> Result<Self> {
        let name = name.into();
        // Negated comparisons so NaN corners are rejected too
        if !(tl.x <= br.x) || !(tl.y >= br.y) {
            return Err(RelaxError::InvalidRegion { region: name, tl, br });
        }
        Ok(Self {
            name,
            tl,
            br,
            potential,
        })
    }

    /// Validate a region spec.
    pub fn from_spec(spec: &RegionSpec) -> Result<Self> {
        Self::new(spec.name.clone(), spec.tl, spec.br, spec.potential)
    }

    /// Check whether `c` lies inside the rectangle, edges included.
    pub fn contains(&self, c: Coordinate) -> bool {
        self.tl.x <= c.x && c.x <= self.br.x && self.br.y <= c.y && c.y <= self.tl.y
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn potential(&self) -> f64 {
        self.potential
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TL: {} BR: {} ({})", self.name, self.tl, self.br, self.potential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new("plate", Coordinate::new(-5.0, 5.0), Coordinate::new(5.0, -5.0), 1.0)
            .unwrap();
        assert!(r.contains(Coordinate::new(0.0, 0.0)));
        assert!(r.contains(Coordinate::new(-5.0, 5.0)));
        assert!(r.contains(Coordinate::new(5.0, -5.0)));
        assert!(r.contains(Coordinate::new(5.0, 0.0)));
        assert!(!r.contains(Coordinate::new(5.0001, 0.0)));
        assert!(!r.contains(Coordinate::new(0.0, -5.0001)));
    }

    #[test]
    fn test_degenerate_rect_is_valid() {
        let p = Coordinate::new(1.0, 1.0);
        let r = Rect::new("point", p, p, 3.0).unwrap();
        assert!(r.contains(p));
    }

    #[test]
    fn test_swapped_corners_rejected() {
        let err = Rect::new("bad", Coordinate::new(5.0, 5.0), Coordinate::new(-5.0, -5.0), 1.0)
            .unwrap_err();
        assert!(matches!(err, RelaxError::InvalidRegion { ref region, .. } if region == "bad"));

        // y flipped: top-left is below bottom-right
        let err = Rect::new("flip", Coordinate::new(-5.0, -5.0), Coordinate::new(5.0, 5.0), 1.0)
            .unwrap_err();
        assert!(matches!(err, RelaxError::InvalidRegion { .. }));
    }

    #[test]
    fn test_nan_corner_rejected() {
        let result =
            Rect::new("nan", Coordinate::new(f64::NAN, 1.0), Coordinate::new(1.0, 0.0), 1.0);
        assert!(result.is_err());
    }
}
