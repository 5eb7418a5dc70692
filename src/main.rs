//! Relax - 2D Laplace potential solver
//!
//! Relaxes a scene to its steady-state potential and writes the result.
//!
//! # Usage
//!
//! ```bash
//! relax plates.scn --history errors.csv > field.ppm
//! relax plates.scn --format raw --max-sweeps 5000 --output field.f32
//! ```

use std::path::PathBuf;

use clap::Parser;
use relax_core::{
    dsl,
    error::Result,
    output::{write_field, write_history, OutputFormat},
    scene::Scene,
    solver::SessionConfig,
    Session,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// 2D Laplace potential solver (successive over-relaxation)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scene description file (.scn)
    #[arg(value_name = "SCENE_FILE")]
    scene_file: PathBuf,

    /// Field output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ppm)]
    format: OutputFormat,

    /// Write the field here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the per-sweep error history as CSV
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Stop after this many sweeps even if not converged
    #[arg(long, value_name = "N")]
    max_sweeps: Option<usize>,

    /// Override the scene's relaxation factor
    #[arg(long)]
    omega: Option<f64>,

    /// Override the scene's convergence threshold
    #[arg(long)]
    max_error: Option<f64>,
}

/// Log to stderr; stdout may carry field data. `RUST_LOG` overrides the filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    // Parse the scene file
    let ast = dsl::parse_file(&args.scene_file)?;
    let scene = Scene::from_ast(ast)?;

    // Command line tunables win over the scene's
    let mut config = SessionConfig::from_scene(&scene);
    if let Some(omega) = args.omega {
        config = config.with_omega(omega);
    }
    if let Some(max_error) = args.max_error {
        config = config.with_max_error(max_error);
    }

    let mut session = Session::with_config(scene, config)?;

    let state = session.run(args.max_sweeps);
    if state.is_converged() {
        info!(
            iterations = state.iteration,
            max_residual = state.last_max_residual,
            "done"
        );
    } else {
        warn!(
            iterations = state.iteration,
            max_residual = state.last_max_residual,
            "sweep limit reached before convergence"
        );
    }

    write_field(&session, args.format, args.output.as_deref())?;

    if let Some(path) = &args.history {
        write_history(&session, path)?;
    }

    Ok(())
}
