//! Scene configuration: everything supplied once before solving starts.

use crate::dsl::SceneAst;
use crate::error::{RelaxError, Result};
use crate::{
    DEFAULT_CENTER, DEFAULT_DOWNSAMPLE, DEFAULT_MAX_ERROR, DEFAULT_MAX_POTENTIAL, DEFAULT_OMEGA,
    DEFAULT_SCALE, DEFAULT_VIEWPORT,
};

use super::mapper::CoordinateMapper;
use super::types::{Coordinate, RegionSpec};

/// A complete scene ready to be turned into a solver session.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Number of samples along x
    pub width: usize,
    /// Number of samples along y
    pub height: usize,
    /// Display pixels per sample (used only when rendering)
    pub pixel_size: usize,
    /// Domain point at the middle of the window
    pub center: Coordinate,
    /// Domain width covered by the window
    pub scale: f64,
    /// SOR relaxation factor
    pub omega: f64,
    /// Convergence threshold on the per-sweep maximum residual
    pub max_error: f64,
    /// Potential mapped to the hot end of the heatmap
    pub max_potential: f64,
    /// Boundary regions in registration order
    pub regions: Vec<RegionSpec>,
}

impl Default for Scene {
    fn default() -> Self {
        let (w_px, h_px) = DEFAULT_VIEWPORT;
        Self::from_viewport(w_px, h_px, DEFAULT_DOWNSAMPLE)
    }
}

impl Scene {
    /// Create an empty scene with an explicit `width x height` sample grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixel_size: 1,
            center: DEFAULT_CENTER,
            scale: DEFAULT_SCALE,
            omega: DEFAULT_OMEGA,
            max_error: DEFAULT_MAX_ERROR,
            max_potential: DEFAULT_MAX_POTENTIAL,
            regions: Vec::new(),
        }
    }

    /// Create an empty scene for a display viewport sampled every
    /// `downsample` pixels.
    ///
    /// A `downsample` of 0 yields an empty grid, which validation rejects.
    pub fn from_viewport(width_px: usize, height_px: usize, downsample: usize) -> Self {
        let (width, height) = match downsample {
            0 => (0, 0),
            d => (width_px / d, height_px / d),
        };
        Self {
            pixel_size: downsample,
            ..Self::new(width, height)
        }
    }

    /// Set the window center.
    pub fn with_center(mut self, center: Coordinate) -> Self {
        self.center = center;
        self
    }

    /// Set the window width in domain units.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the SOR relaxation factor.
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Set the convergence threshold.
    pub fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = max_error;
        self
    }

    /// Set the heatmap's full-scale potential.
    pub fn with_max_potential(mut self, max_potential: f64) -> Self {
        self.max_potential = max_potential;
        self
    }

    /// Set the rendered size of one sample in pixels.
    pub fn with_pixel_size(mut self, pixel_size: usize) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    /// Append a boundary region; later regions lose overlaps to earlier ones.
    pub fn with_region(mut self, region: RegionSpec) -> Self {
        self.regions.push(region);
        self
    }

    /// Coordinate mapper for this scene's grid and window.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.width, self.height, self.center, self.scale)
    }

    /// Build a scene from a parsed scene description.
    pub fn from_ast(ast: SceneAst) -> Result<Self> {
        let mut scene = match ast.grid {
            Some((width, height)) => Self::new(width, height),
            None => {
                let (w_px, h_px) = ast.viewport.unwrap_or(DEFAULT_VIEWPORT);
                let downsample = ast.downsample.unwrap_or(DEFAULT_DOWNSAMPLE);
                if downsample == 0 {
                    return Err(RelaxError::scene_param("downsample must be at least 1"));
                }
                Self::from_viewport(w_px, h_px, downsample)
            }
        };

        if let Some(downsample) = ast.downsample {
            scene.pixel_size = downsample.max(1);
        }
        if let Some((x, y)) = ast.center {
            scene.center = Coordinate::new(x, y);
        }
        if let Some(scale) = ast.scale {
            scene.scale = scale;
        }
        if let Some(omega) = ast.omega {
            scene.omega = omega;
        }
        if let Some(max_error) = ast.max_error {
            scene.max_error = max_error;
        }
        if let Some(max_potential) = ast.max_potential {
            scene.max_potential = max_potential;
        }

        scene.regions = ast
            .regions
            .into_iter()
            .map(|def| RegionSpec {
                name: def.name,
                tl: Coordinate::new(def.tl.0, def.tl.1),
                br: Coordinate::new(def.br.0, def.br.1),
                potential: def.potential,
                line: def.line,
            })
            .collect();

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;

    #[test]
    fn test_default_scene_matches_viewport() {
        let scene = Scene::default();
        assert_eq!(scene.width, 400);
        assert_eq!(scene.height, 250);
        assert_eq!(scene.pixel_size, 2);
        assert!(scene.regions.is_empty());
    }

    #[test]
    fn test_builder_keeps_region_order() {
        let (tl, br) = (Coordinate::new(0.0, 1.0), Coordinate::new(1.0, 0.0));
        let scene = Scene::new(10, 10)
            .with_region(RegionSpec::new("a", tl, br, 1.0))
            .with_region(RegionSpec::new("b", tl, br, 2.0));
        let names: Vec<_> = scene.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_from_ast_grid_overrides_viewport() {
        let ast = dsl::parse(".viewport 800 500\n.downsample 4\n.grid 30 20\n").unwrap();
        let scene = Scene::from_ast(ast).unwrap();
        assert_eq!((scene.width, scene.height), (30, 20));
        assert_eq!(scene.pixel_size, 4);
    }

    #[test]
    fn test_from_ast_viewport_downsample() {
        let ast = dsl::parse(".viewport 100 50\n.downsample 5\n").unwrap();
        let scene = Scene::from_ast(ast).unwrap();
        assert_eq!((scene.width, scene.height), (20, 10));
    }

    #[test]
    fn test_from_ast_zero_downsample_rejected() {
        let ast = dsl::parse(".downsample 0\n").unwrap();
        assert!(matches!(
            Scene::from_ast(ast),
            Err(RelaxError::InvalidSceneParam { .. })
        ));
    }

    #[test]
    fn test_from_ast_tunables() {
        let ast = dsl::parse(
            ".grid 3 3\n.center 1 -2\n.scale 4\n.omega 1.5\n.maxerror 1m\n.maxpot 10k\nRECT p -1 1 1 -1 5\n",
        )
        .unwrap();
        let scene = Scene::from_ast(ast).unwrap();
        assert_eq!(scene.center, Coordinate::new(1.0, -2.0));
        assert_eq!(scene.scale, 4.0);
        assert_eq!(scene.omega, 1.5);
        assert!((scene.max_error - 1e-3).abs() < 1e-15);
        assert_eq!(scene.max_potential, 10_000.0);
        assert_eq!(scene.regions.len(), 1);
        assert_eq!(scene.regions[0].line, 7);
    }
}
