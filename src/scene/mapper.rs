//! Grid index to domain coordinate mapping.

use super::types::Coordinate;

/// Maps grid indices `(i, j)` onto the real plane.
///
/// `i` runs left to right and `j` runs top to bottom, so the `y` axis is
/// flipped: `j = 0` is the top edge of the window (highest `y`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: usize,
    height: usize,
    center: Coordinate,
    scale: f64,
}

impl CoordinateMapper {
    /// Create a mapper for a `width x height` grid centred on `center`,
    /// spanning `scale` domain units on each axis.
    pub fn new(width: usize, height: usize, center: Coordinate, scale: f64) -> Self {
        Self {
            width,
            height,
            center,
            scale,
        }
    }

    /// Domain coordinate of sample `(i, j)`.
    ///
    /// ```text
    /// x = center.x + (i / (W - 1) - 0.5) * scale
    /// y = center.y - (j / (H - 1) - 0.5) * scale
    /// ```
    pub fn coord(&self, i: usize, j: usize) -> Coordinate {
        let fx = axis_fraction(i, self.width);
        let fy = axis_fraction(j, self.height);
        Coordinate {
            x: self.center.x + (fx - 0.5) * self.scale,
            y: self.center.y + (fy - 0.5) * self.scale * -1.0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Position of `index` along an axis of `len` samples, in [0, 1].
///
/// A single-sample axis sits on the window center.
fn axis_fraction(index: usize, len: usize) -> f64 {
    if len <= 1 {
        0.5
    } else {
        index as f64 / (len - 1) as f64
    }
}
