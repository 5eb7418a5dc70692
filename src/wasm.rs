//! WASM bindings for Relax Core.
//!
//! This module provides JavaScript-friendly bindings for driving a solve from
//! a browser page. Each call to `step` runs exactly one sweep, so the page's
//! event loop stays responsive and can repaint between sweeps.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRelaxSim } from 'relax_core';
//!
//! await init();
//!
//! const scene = `
//!   .viewport 800 500
//!   .downsample 2
//!   .center 15 0
//!   .scale 50
//!   RECT anode -5 5 5 -5 100k
//! `;
//!
//! const sim = new WasmRelaxSim(scene);
//!
//! function update() {
//!   if (!sim.step()) setTimeout(update, 1);
//! }
//! function draw(ctx) {
//!   const rgba = sim.render_rgba();
//!   ctx.putImageData(new ImageData(new Uint8ClampedArray(rgba), sim.image_width, sim.image_height), 0, 0);
//!   setTimeout(() => draw(ctx), 800);
//! }
//! update();
//! draw(canvas.getContext('2d'));
//! ```

use wasm_bindgen::prelude::*;

use crate::dsl;
use crate::error::RelaxError;
use crate::render::Heatmap;
use crate::scene::Scene;
use crate::solver::{Session, SessionConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: RelaxError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible relaxation session.
///
/// This struct wraps the native `Session` and exposes its step function and
/// read-only views for rendering, plotting and status display.
#[wasm_bindgen]
pub struct WasmRelaxSim {
    session: Session,
    heatmap: Heatmap,
}

impl WasmRelaxSim {
    fn scene(scene_dsl: &str) -> Result<Scene, JsValue> {
        let ast = dsl::parse(scene_dsl).map_err(to_js)?;
        Scene::from_ast(ast).map_err(to_js)
    }

    fn from_session(session: Session) -> WasmRelaxSim {
        let heatmap = Heatmap::new(session.scene().max_potential);
        WasmRelaxSim { session, heatmap }
    }
}

#[wasm_bindgen]
impl WasmRelaxSim {
    /// Create a new session from a scene DSL string.
    ///
    /// # Returns
    /// A new `WasmRelaxSim` instance or an error if the scene is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(scene_dsl: &str) -> Result<WasmRelaxSim, JsValue> {
        let scene = Self::scene(scene_dsl)?;
        Ok(Self::from_session(Session::new(scene).map_err(to_js)?))
    }

    /// Create a new session with tunables overriding the scene's.
    ///
    /// # Arguments
    /// * `scene_dsl` - The scene description in the relax DSL
    /// * `omega` - Relaxation factor (converges for 0 < omega < 2)
    /// * `max_error` - Convergence threshold on a sweep's maximum residual
    #[wasm_bindgen]
    pub fn with_config(
        scene_dsl: &str,
        omega: f64,
        max_error: f64,
    ) -> Result<WasmRelaxSim, JsValue> {
        let scene = Self::scene(scene_dsl)?;
        let config = SessionConfig::new()
            .with_omega(omega)
            .with_max_error(max_error);
        Ok(Self::from_session(Session::with_config(scene, config).map_err(to_js)?))
    }

    /// Run one sweep. Returns `true` once the session has converged.
    ///
    /// Calls after convergence do nothing.
    #[wasm_bindgen]
    pub fn step(&mut self) -> bool {
        self.session.run_one_sweep().is_converged()
    }

    /// Completed sweeps.
    #[wasm_bindgen(getter)]
    pub fn iteration(&self) -> usize {
        self.session.state().iteration
    }

    /// Maximum residual of the latest sweep.
    #[wasm_bindgen(getter)]
    pub fn last_max_residual(&self) -> f64 {
        self.session.state().last_max_residual
    }

    #[wasm_bindgen(getter)]
    pub fn converged(&self) -> bool {
        self.session.is_converged()
    }

    /// Samples along x.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.session.field().width()
    }

    /// Samples along y.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.session.field().height()
    }

    /// Rendered image width in pixels.
    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> usize {
        self.width() * self.session.scene().pixel_size.max(1)
    }

    /// Rendered image height in pixels.
    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> usize {
        self.height() * self.session.scene().pixel_size.max(1)
    }

    /// Potential at sample `(i, j)`, or `undefined` outside the grid.
    #[wasm_bindgen]
    pub fn potential(&self, i: usize, j: usize) -> Option<f64> {
        self.session.field().potential(i, j).ok()
    }

    /// All potentials, row by row.
    #[wasm_bindgen]
    pub fn potentials(&self) -> Vec<f64> {
        self.session.field().potentials_row_major()
    }

    /// Error history flattened as `[iteration, max_residual, ...]`.
    #[wasm_bindgen]
    pub fn error_history(&self) -> Vec<f64> {
        self.session
            .history()
            .iter()
            .flat_map(|r| [r.iteration as f64, r.max_residual])
            .collect()
    }

    /// Heatmap as RGBA bytes sized `image_width x image_height`.
    #[wasm_bindgen]
    pub fn render_rgba(&self) -> Result<Vec<u8>, JsValue> {
        self.heatmap
            .render_rgba(self.session.field(), self.session.scene().pixel_size)
            .map_err(to_js)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
