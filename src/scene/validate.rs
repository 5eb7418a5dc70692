//! Scene validation.

use tracing::warn;

use crate::error::{RelaxError, Result};
use crate::field::Field;
use crate::render::image_len;

use super::Scene;

/// Validate a scene before building a session.
///
/// Checks:
/// - Grid has at least one sample on each axis and fits in memory
/// - The rendered RGBA image at `pixel_size` fits in memory
/// - Window scale is finite and positive
/// - Tunables are finite, heatmap full scale is positive
///
/// Region corners are checked when the boundary registry is built.
/// A relaxation factor outside (0, 2) is allowed but logged, since
/// convergence is then not guaranteed.
pub fn validate_scene(scene: &Scene) -> Result<()> {
    let samples = Field::checked_len(scene.width, scene.height);
    if samples.map_or(true, |len| len == 0) {
        return Err(RelaxError::InvalidGrid {
            width: scene.width,
            height: scene.height,
        });
    }

    if image_len(scene.width, scene.height, scene.pixel_size, 4).is_none() {
        return Err(RelaxError::scene_param(format!(
            "{}x{} grid at {} pixels per sample is too large to render",
            scene.width,
            scene.height,
            scene.pixel_size
        )));
    }

    if !scene.scale.is_finite() || scene.scale <= 0.0 {
        return Err(RelaxError::scene_param(format!(
            "scale must be finite and positive, got {}",
            scene.scale
        )));
    }

    if !scene.center.x.is_finite() || !scene.center.y.is_finite() {
        return Err(RelaxError::scene_param(format!(
            "center must be finite, got {}",
            scene.center
        )));
    }

    if !scene.omega.is_finite() {
        return Err(RelaxError::scene_param(format!(
            "omega must be finite, got {}",
            scene.omega
        )));
    }

    if scene.max_error.is_nan() {
        return Err(RelaxError::scene_param("max error must not be NaN"));
    }

    if !scene.max_potential.is_finite() || scene.max_potential <= 0.0 {
        return Err(RelaxError::scene_param(format!(
            "max potential must be finite and positive, got {}",
            scene.max_potential
        )));
    }

    if scene.omega <= 0.0 || scene.omega >= 2.0 {
        warn!(
            omega = scene.omega,
            "relaxation factor outside (0, 2), the solve may never converge"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use crate::solver::Session;

    #[test]
    fn test_default_scene_is_valid() {
        assert!(validate_scene(&Scene::default()).is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = validate_scene(&Scene::new(0, 5)).unwrap_err();
        assert!(matches!(err, RelaxError::InvalidGrid { width: 0, height: 5 }));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let scene = Scene::from_ast(dsl::parse(".grid 1e19 2\n").unwrap()).unwrap();
        assert!(matches!(validate_scene(&scene), Err(RelaxError::InvalidGrid { height: 2, .. })));
        assert!(Session::new(scene).is_err());
    }

    #[test]
    fn test_oversized_downsample_rejected() {
        let scene = Scene::from_ast(dsl::parse(".grid 2 2\n.downsample 1e19\n").unwrap()).unwrap();
        assert!(matches!(
            validate_scene(&scene),
            Err(RelaxError::InvalidSceneParam { .. })
        ));
        assert!(Session::new(scene).is_err());
    }

    #[test]
    fn test_bad_scale_rejected() {
        assert!(validate_scene(&Scene::new(3, 3).with_scale(0.0)).is_err());
        assert!(validate_scene(&Scene::new(3, 3).with_scale(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_out_of_range_omega_is_not_an_error() {
        assert!(validate_scene(&Scene::new(3, 3).with_omega(2.5)).is_ok());
        assert!(validate_scene(&Scene::new(3, 3).with_omega(f64::NAN)).is_err());
    }

    #[test]
    fn test_max_potential_must_be_positive() {
        assert!(validate_scene(&Scene::new(3, 3).with_max_potential(0.0)).is_err());
    }
}
