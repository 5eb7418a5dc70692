//! Heatmap rendering of a potential field.
//!
//! Rendering only reads the [`Field`]. It can run between any two sweeps and
//! then shows a partially relaxed field.
//!
//! ## Color scale
//!
//! With `s = potential / max_potential`:
//!
//! ```text
//! hue        = (1 - s) * 250 degrees      (blue at 0, red at full scale)
//! saturation = 100%
//! lightness  = exp(-1 / (200 s)) * 40%   (black at 0)
//! ```

use crate::error::{RelaxError, Result};
use crate::field::Field;

/// Maps potentials to colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heatmap {
    max_potential: f64,
}

impl Heatmap {
    /// Create a heatmap whose hot end is `max_potential`.
    pub fn new(max_potential: f64) -> Self {
        Self { max_potential }
    }

    /// Hue (degrees), saturation and lightness (both in [0, 1]) for a potential.
    pub fn hsl(&self, potential: f64) -> (f64, f64, f64) {
        let s = potential / self.max_potential;
        let lightness = if s == 0.0 || s.is_nan() {
            0.0
        } else {
            ((-1.0 / (s * 200.0)).exp() * 0.4).clamp(0.0, 1.0)
        };
        let hue = ((1.0 - s) * 250.0).rem_euclid(360.0);
        let hue = if hue.is_finite() { hue } else { 0.0 };
        (hue, 1.0, lightness)
    }

    /// RGB color for a potential.
    pub fn color(&self, potential: f64) -> [u8; 3] {
        let (h, s, l) = self.hsl(potential);
        hsl_to_rgb(h, s, l)
    }

    /// Render the field as packed RGB, one `pixel_size` square per sample.
    ///
    /// Image width is `field.width() * pixel_size`; sample `(i, j)` lands in
    /// column block `i`, row block `j`.
    pub fn render_rgb(&self, field: &Field, pixel_size: usize) -> Result<Vec<u8>> {
        self.render(field, pixel_size, None)
    }

    /// Render the field as packed RGBA (opaque), e.g. for a canvas `ImageData`.
    pub fn render_rgba(&self, field: &Field, pixel_size: usize) -> Result<Vec<u8>> {
        self.render(field, pixel_size, Some(u8::MAX))
    }

    fn render(&self, field: &Field, pixel_size: usize, alpha: Option<u8>) -> Result<Vec<u8>> {
        let pixel_size = pixel_size.max(1);
        let channels = if alpha.is_some() { 4 } else { 3 };
        let Some(len) = image_len(field.width(), field.height(), pixel_size, channels) else {
            return Err(RelaxError::scene_param(format!(
                "{}x{} field at {} pixels per sample is too large to render",
                field.width(),
                field.height(),
                pixel_size
            )));
        };
        // Both products are bounded by `len`
        let img_w = field.width() * pixel_size;
        let mut out = vec![0u8; len];

        for sample in field.samples() {
            let [r, g, b] = self.color(sample.potential);
            for dy in 0..pixel_size {
                let row = sample.j * pixel_size + dy;
                for dx in 0..pixel_size {
                    let col = sample.i * pixel_size + dx;
                    let at = (row * img_w + col) * channels;
                    out[at] = r;
                    out[at + 1] = g;
                    out[at + 2] = b;
                    if let Some(a) = alpha {
                        out[at + 3] = a;
                    }
                }
            }
        }

        Ok(out)
    }
}

/// Byte length of a `width x height` field rendered at `pixel_size` with
/// `channels` bytes per pixel, or `None` if it would not be addressable.
pub fn image_len(width: usize, height: usize, pixel_size: usize, channels: usize) -> Option<usize> {
    let pixel_size = pixel_size.max(1);
    let img_w = width.checked_mul(pixel_size)?;
    let img_h = height.checked_mul(pixel_size)?;
    img_w
        .checked_mul(img_h)?
        .checked_mul(channels)
        .filter(|&len| len <= isize::MAX as usize)
}

/// Convert HSL (hue in degrees, saturation and lightness in [0, 1]) to RGB.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [u8; 3] {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}
