//! Field and error-history output (CLI only).
//!
//! Field formats:
//! - [`OutputFormat::Ppm`]: binary PPM (P6) heatmap
//! - [`OutputFormat::Raw`]: little-endian `f32` potentials in image order
//!   (row `j` by row, `i` ascending), no header
//!
//! The error history is written as CSV with an `iteration,max_residual`
//! header.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{RelaxError, Result};
use crate::field::Field;
use crate::render::Heatmap;
use crate::solver::{ErrorRecord, Session};

/// Samples converted per write in raw mode.
pub const BUFFER_SIZE: usize = 256;

/// Field output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Heatmap image (binary PPM)
    #[default]
    Ppm,
    /// Little-endian f32 potentials
    Raw,
}

fn output_error(e: io::Error) -> RelaxError {
    RelaxError::OutputError {
        message: e.to_string(),
    }
}

/// Writes fields to a byte sink.
pub struct FieldWriter<W: Write> {
    sink: W,
    buffer: Vec<u8>,
}

impl<W: Write> FieldWriter<W> {
    /// Create a new field writer.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: vec![0u8; BUFFER_SIZE * 4], // 4 bytes per f32
        }
    }

    /// Write potentials as raw little-endian `f32`.
    pub fn write_raw(&mut self, field: &Field) -> Result<()> {
        let potentials = field.potentials_row_major();
        for chunk in potentials.chunks(BUFFER_SIZE) {
            let bytes = &mut self.buffer[..chunk.len() * 4];
            for (dst, &p) in bytes.chunks_exact_mut(4).zip(chunk) {
                dst.copy_from_slice(&(p as f32).to_le_bytes());
            }
            self.sink.write_all(bytes).map_err(output_error)?;
        }
        Ok(())
    }

    /// Write a binary PPM heatmap, `pixel_size` pixels per sample.
    pub fn write_ppm(&mut self, field: &Field, heatmap: &Heatmap, pixel_size: usize) -> Result<()> {
        let pixel_size = pixel_size.max(1);
        // Rendering first rejects sizes whose header arithmetic would overflow
        let pixels = heatmap.render_rgb(field, pixel_size)?;
        let header = format!(
            "P6\n{} {}\n255\n",
            field.width() * pixel_size,
            field.height() * pixel_size
        );
        self.sink.write_all(header.as_bytes()).map_err(output_error)?;
        self.sink.write_all(&pixels).map_err(output_error)
    }

    /// Flush the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(output_error)
    }

    /// Recover the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Write the error history as CSV.
pub fn write_history_csv<W: Write>(history: &[ErrorRecord], mut sink: W) -> Result<()> {
    writeln!(sink, "iteration,max_residual").map_err(output_error)?;
    for record in history {
        writeln!(sink, "{},{}", record.iteration, record.max_residual).map_err(output_error)?;
    }
    sink.flush().map_err(output_error)
}

fn open(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| RelaxError::OutputError {
            message: format!("cannot create '{}': {}", path.display(), e),
        })
}

/// Write the session's field in `format` to `path`, or stdout if `None`.
pub fn write_field(session: &Session, format: OutputFormat, path: Option<&Path>) -> Result<()> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(open(path)?),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = FieldWriter::new(sink);

    match format {
        OutputFormat::Ppm => {
            let heatmap = Heatmap::new(session.scene().max_potential);
            writer.write_ppm(session.field(), &heatmap, session.scene().pixel_size)?;
        }
        OutputFormat::Raw => writer.write_raw(session.field())?,
    }

    writer.flush()
}

/// Write the session's error history as CSV to `path`.
pub fn write_history(session: &Session, path: &Path) -> Result<()> {
    write_history_csv(session.history(), open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Coordinate, CoordinateMapper};

    fn field() -> Field {
        let mapper = CoordinateMapper::new(2, 2, Coordinate::new(0.0, 0.0), 1.0);
        let mut f = Field::new(&mapper).unwrap();
        f.set_potential(1, 0, 1.5).unwrap();
        f.set_potential(0, 1, -2.0).unwrap();
        f
    }

    #[test]
    fn test_raw_layout() {
        let mut writer = FieldWriter::new(Vec::new());
        writer.write_raw(&field()).unwrap();
        let bytes = writer.into_inner();

        assert_eq!(bytes.len(), 16);
        let values: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(values, vec![0.0, 1.5, -2.0, 0.0]);
    }

    #[test]
    fn test_raw_spans_multiple_buffers() {
        let f = Field::new(&CoordinateMapper::new(30, 20, Coordinate::new(0.0, 0.0), 1.0)).unwrap();
        let mut writer = FieldWriter::new(Vec::new());
        writer.write_raw(&f).unwrap();
        assert_eq!(writer.into_inner().len(), 600 * 4);
    }

    #[test]
    fn test_ppm_header_and_size() {
        let mut writer = FieldWriter::new(Vec::new());
        writer.write_ppm(&field(), &Heatmap::new(10.0), 3).unwrap();
        let bytes = writer.into_inner();

        let header = b"P6\n6 6\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(bytes.len(), header.len() + 6 * 6 * 3);
    }

    #[test]
    fn test_history_csv() {
        let history = [
            ErrorRecord { iteration: 1, max_residual: 2.5 },
            ErrorRecord { iteration: 2, max_residual: 0.05 },
        ];
        let mut out = Vec::new();
        write_history_csv(&history, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "iteration,max_residual\n1,2.5\n2,0.05\n");
    }
}
