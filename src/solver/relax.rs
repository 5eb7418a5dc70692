//! Single-sweep SOR relaxation.

use crate::field::Field;
use crate::scene::BoundaryRegistry;

/// Potential assumed just outside the field's outer edge.
pub const GROUND_POTENTIAL: f64 = 0.0;

/// Applies one successive over-relaxation sweep to a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationEngine {
    omega: f64,
}

impl RelaxationEngine {
    /// Create an engine with relaxation factor `omega`.
    ///
    /// `omega` is not range checked; values outside (0, 2) may diverge.
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Run one sweep over every sample and return the sweep's maximum
    /// residual.
    ///
    /// Traversal is ascending `i` (outer) then ascending `j` (inner), and
    /// updates are written in place. Neighbours at lower indices therefore
    /// already hold this sweep's values while those at higher indices still
    /// hold the previous sweep's, which makes this a Gauss-Seidel style
    /// sweep. Changing the order changes the convergence trajectory.
    ///
    /// For each sample:
    /// 1. If a boundary region contains its coordinate, the potential is set
    ///    to that region's value and nothing else happens.
    /// 2. Otherwise `r = (p[i+1,j] + p[i-1,j] + p[i,j+1] + p[i,j-1]) / 4 - p[i,j]`,
    ///    with neighbours off the grid taken as [`GROUND_POTENTIAL`], and the
    ///    sample moves by `omega * r`.
    ///
    /// The returned maximum is over the signed residuals and starts at 0,
    /// so a sweep whose residuals are all negative reports 0.
    pub fn sweep(&self, field: &mut Field, boundaries: &BoundaryRegistry) -> f64 {
        let (width, height) = (field.width(), field.height());
        let at = |i: usize, j: usize| i * height + j;
        let samples = field.samples_mut();

        let mut running_max = 0.0f64;

        for i in 0..width {
            for j in 0..height {
                let idx = at(i, j);

                if let Some(fixed) = boundaries.classify(samples[idx].coord) {
                    samples[idx].potential = fixed;
                    continue;
                }

                let right = if i + 1 < width {
                    samples[at(i + 1, j)].potential
                } else {
                    GROUND_POTENTIAL
                };
                let left = if i > 0 {
                    samples[at(i - 1, j)].potential
                } else {
                    GROUND_POTENTIAL
                };
                let below = if j + 1 < height {
                    samples[at(i, j + 1)].potential
                } else {
                    GROUND_POTENTIAL
                };
                let above = if j > 0 {
                    samples[at(i, j - 1)].potential
                } else {
                    GROUND_POTENTIAL
                };

                let residual = 0.25 * (right + left + below + above) - samples[idx].potential;
                if running_max < residual {
                    running_max = residual;
                }

                samples[idx].potential += self.omega * residual;
            }
        }

        running_max
    }
}
