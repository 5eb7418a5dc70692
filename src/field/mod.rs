//! Potential field storage.
//!
//! The [`Field`] is a fixed `W x H` array of [`Sample`]s. Each sample's
//! domain coordinate is computed once at construction; only potentials
//! change afterwards.
//!
//! Samples are stored with `i` as the outer index (`i * H + j`), which is
//! also the order the relaxation sweep visits them.

use std::mem;

use crate::error::{RelaxError, Result};
use crate::scene::{Coordinate, CoordinateMapper};

/// One grid sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Horizontal grid index
    pub i: usize,
    /// Vertical grid index (grows downward)
    pub j: usize,
    /// Domain coordinate of this sample
    pub coord: Coordinate,
    /// Current potential
    pub potential: f64,
}

/// The 2D potential field.
#[derive(Debug, Clone)]
pub struct Field {
    width: usize,
    height: usize,
    samples: Vec<Sample>,
}

impl Field {
    /// Allocate a field for the mapper's grid with all potentials at zero.
    pub fn new(mapper: &CoordinateMapper) -> Result<Self> {
        let (width, height) = (mapper.width(), mapper.height());
        let len = Self::checked_len(width, height)
            .filter(|&len| len > 0)
            .ok_or(RelaxError::InvalidGrid { width, height })?;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|_| RelaxError::InvalidGrid { width, height })?;
        for i in 0..width {
            for j in 0..height {
                samples.push(Sample {
                    i,
                    j,
                    coord: mapper.coord(i, j),
                    potential: 0.0,
                });
            }
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Sample count of a `width x height` field, or `None` if its storage
    /// would not be addressable.
    pub fn checked_len(width: usize, height: usize) -> Option<usize> {
        let len = width.checked_mul(height)?;
        len.checked_mul(mem::size_of::<Sample>())
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .map(|_| len)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the sample at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Result<&Sample> {
        let idx = self.index(i, j)?;
        Ok(&self.samples[idx])
    }

    /// Potential at `(i, j)`.
    pub fn potential(&self, i: usize, j: usize) -> Result<f64> {
        self.get(i, j).map(|s| s.potential)
    }

    /// Overwrite the potential at `(i, j)`.
    ///
    /// Boundary samples are reset on the next sweep regardless.
    pub fn set_potential(&mut self, i: usize, j: usize, potential: f64) -> Result<()> {
        let idx = self.index(i, j)?;
        self.samples[idx].potential = potential;
        Ok(())
    }

    /// All samples in sweep order (ascending `i`, then ascending `j`).
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Potentials in image order: row `j` by row, `i` ascending within a row.
    pub fn potentials_row_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.samples.len());
        for j in 0..self.height {
            for i in 0..self.width {
                out.push(self.samples[self.flat(i, j)].potential);
            }
        }
        out
    }

    /// Flat storage index; caller guarantees bounds.
    #[inline]
    pub(crate) fn flat(&self, i: usize, j: usize) -> usize {
        i * self.height + j
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    fn index(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.width || j >= self.height {
            return Err(RelaxError::out_of_bounds(i, j, self.width, self.height));
        }
        Ok(self.flat(i, j))
    }
}
