//! Solver session: one scene, one field, one solve.

use tracing::{debug, info};

use crate::error::Result;
use crate::field::Field;
use crate::scene::{validate_scene, BoundaryRegistry, Scene};
use crate::{DEFAULT_MAX_ERROR, DEFAULT_OMEGA};

use super::controller::{ConvergenceController, ErrorRecord, SolverState};
use super::relax::RelaxationEngine;

/// Solver tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// SOR relaxation factor.
    pub omega: f64,
    /// Convergence threshold on a sweep's maximum residual.
    pub max_error: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            omega: DEFAULT_OMEGA,
            max_error: DEFAULT_MAX_ERROR,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the tunables a scene was configured with.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            omega: scene.omega,
            max_error: scene.max_error,
        }
    }

    /// Set the relaxation factor.
    ///
    /// - 1.0: plain Gauss-Seidel
    /// - 1.9 (default): strong over-relaxation, fast on large grids
    /// - outside (0, 2): may never converge
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Set the convergence threshold.
    pub fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = max_error;
        self
    }
}

/// A complete simulation session.
///
/// Owns the field, the boundary registry and the convergence state. Hosts
/// drive it one sweep at a time with [`Session::run_one_sweep`], reading the
/// field and error history between calls.
#[derive(Debug, Clone)]
pub struct Session {
    scene: Scene,
    boundaries: BoundaryRegistry,
    field: Field,
    engine: RelaxationEngine,
    controller: ConvergenceController,
}

impl Session {
    /// Create a session using the scene's own tunables.
    ///
    /// Fails if the scene is invalid or any region's corners are out of
    /// order; no field is allocated in that case.
    pub fn new(scene: Scene) -> Result<Self> {
        validate_scene(&scene)?;
        let boundaries = BoundaryRegistry::from_specs(&scene.regions)?;
        let field = Field::new(&scene.mapper())?;

        for region in boundaries.regions() {
            debug!(%region, "boundary region");
        }

        info!(
            width = scene.width,
            height = scene.height,
            regions = boundaries.len(),
            omega = scene.omega,
            max_error = scene.max_error,
            "session ready"
        );

        Ok(Self {
            engine: RelaxationEngine::new(scene.omega),
            controller: ConvergenceController::new(scene.max_error),
            scene,
            boundaries,
            field,
        })
    }

    /// Create a session with tunables overriding the scene's.
    pub fn with_config(mut scene: Scene, config: SessionConfig) -> Result<Self> {
        scene.omega = config.omega;
        scene.max_error = config.max_error;
        Self::new(scene)
    }

    /// Run exactly one sweep (none once converged) and return the new state.
    pub fn run_one_sweep(&mut self) -> SolverState {
        self.controller
            .step(&self.engine, &mut self.field, &self.boundaries)
    }

    /// Sweep until converged, or until `max_sweeps` more sweeps have run.
    ///
    /// With `None` this only returns once the solve converges.
    pub fn run(&mut self, max_sweeps: Option<usize>) -> SolverState {
        let mut remaining = max_sweeps;
        while !self.is_converged() {
            match remaining {
                Some(0) => break,
                Some(ref mut n) => *n -= 1,
                None => {}
            }
            self.run_one_sweep();
        }
        self.state()
    }

    pub fn state(&self) -> SolverState {
        self.controller.state()
    }

    pub fn is_converged(&self) -> bool {
        self.controller.is_converged()
    }

    /// Per-sweep maximum residuals, oldest first.
    pub fn history(&self) -> &[ErrorRecord] {
        self.controller.history()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access for external forcing between sweeps.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn boundaries(&self) -> &BoundaryRegistry {
        &self.boundaries
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig::from_scene(&self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelaxError;
    use crate::scene::{Coordinate, RegionSpec};
    use crate::solver::SolverStatus;
    use approx::assert_relative_eq;

    fn region(name: &str, tl: (f64, f64), br: (f64, f64), p: f64) -> RegionSpec {
        RegionSpec::new(name, Coordinate::new(tl.0, tl.1), Coordinate::new(br.0, br.1), p)
    }

    fn plates() -> Scene {
        Scene::new(40, 25)
            .with_center(Coordinate::new(15.0, 0.0))
            .with_scale(50.0)
            .with_region(region("anode", (-5.0, 5.0), (5.0, -5.0), 100.0))
            .with_region(region("upper", (30.0, 20.0), (35.0, 2.0), 0.0))
            .with_region(region("lower", (30.0, -2.0), (35.0, -20.0), 0.0))
    }

    fn unit_square(w: usize, h: usize) -> Scene {
        Scene::new(w, h)
            .with_center(Coordinate::new(0.0, 0.0))
            .with_scale(2.0)
    }

    #[test]
    fn test_concrete_covered_scene() {
        let scene = unit_square(3, 3).with_region(region("all", (-1.0, 1.0), (1.0, -1.0), 10.0));
        let mut session = Session::new(scene).unwrap();

        let state = session.run_one_sweep();
        assert_eq!(state.iteration, 1);
        assert_eq!(state.last_max_residual, 0.0);
        assert_eq!(state.status, SolverStatus::Converged);
        assert!(session.field().samples().iter().all(|s| s.potential == 10.0));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_invalid_region_aborts_setup() {
        let scene = Scene::new(3, 3).with_region(RegionSpec::new(
            "inverted",
            Coordinate::new(1.0, -1.0),
            Coordinate::new(-1.0, 1.0),
            1.0,
        ));
        assert!(matches!(Session::new(scene), Err(RelaxError::InvalidRegion { .. })));
    }

    #[test]
    fn test_config_overrides_scene() {
        let scene = Scene::new(3, 3).with_omega(1.2).with_max_error(0.5);
        let config = SessionConfig::new().with_omega(1.7).with_max_error(0.01);
        let session = Session::with_config(scene, config).unwrap();
        assert_eq!(session.config(), SessionConfig { omega: 1.7, max_error: 0.01 });
    }

    #[test]
    fn test_run_respects_cap() {
        // A negative threshold can never be met
        let config = SessionConfig::new().with_max_error(-1.0);
        let mut session = Session::with_config(plates(), config).unwrap();
        let state = session.run(Some(7));
        assert_eq!(state.iteration, 7);
        assert_eq!(state.status, SolverStatus::Running);

        let state = session.run(Some(3));
        assert_eq!(state.iteration, 10);
    }

    #[test]
    fn test_plates_converge_with_boundaries_held() {
        let mut session = Session::new(plates()).unwrap();
        let state = session.run(Some(100_000));
        assert!(state.is_converged());
        assert_eq!(session.history().len(), state.iteration);

        for s in session.field().samples() {
            if let Some(p) = session.boundaries().classify(s.coord) {
                assert_eq!(s.potential, p);
            }
        }
    }

    #[test]
    fn test_scene_file_session() {
        let ast = crate::dsl::parse(include_str!("../../scenes/plates.scn")).unwrap();
        let mut session = Session::new(Scene::from_ast(ast).unwrap()).unwrap();
        assert_eq!((session.field().width(), session.field().height()), (400, 250));
        assert_eq!(session.boundaries().len(), 3);

        let state = session.run(Some(3));
        assert_eq!(state.iteration, 3);
        let anode = session
            .field()
            .samples()
            .iter()
            .find(|s| s.coord.x.abs() < 1.0 && s.coord.y.abs() < 1.0)
            .unwrap();
        assert_eq!(anode.potential, 100_000.0);
        assert!(state.last_max_residual > 0.0);
    }

    #[test]
    fn test_interior_between_bounds() {
        let config = SessionConfig::new().with_omega(1.0).with_max_error(1e-4);
        let mut session = Session::with_config(plates(), config).unwrap();
        session.run(Some(100_000));
        let field = session.field();
        for s in field.samples() {
            assert!(s.potential >= -1e-9 && s.potential <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn test_external_forcing_between_sweeps() {
        let config = SessionConfig::new().with_omega(1.0);
        let mut session = Session::with_config(unit_square(3, 3), config).unwrap();
        session.field_mut().set_potential(1, 1, 8.0).unwrap();

        let state = session.run_one_sweep();
        assert_relative_eq!(state.last_max_residual, 2.0);
        let field = session.field();
        // Edge neighbours of the forced center see it, the corner before it does not
        assert_relative_eq!(field.potential(0, 0).unwrap(), 0.0);
        assert_relative_eq!(field.potential(0, 1).unwrap(), 2.0);
        assert_relative_eq!(field.potential(1, 0).unwrap(), 2.0);
        assert_relative_eq!(field.potential(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_forced_boundary_sample_is_restored() {
        let scene = unit_square(3, 3).with_region(region("pin", (-1.0, 1.0), (-1.0, 1.0), 5.0));
        let mut session = Session::new(scene).unwrap();
        session.run_one_sweep();
        assert_eq!(session.field().potential(0, 0).unwrap(), 5.0);

        session.field_mut().set_potential(0, 0, -40.0).unwrap();
        session.run_one_sweep();
        assert_eq!(session.field().potential(0, 0).unwrap(), 5.0);
    }
}
