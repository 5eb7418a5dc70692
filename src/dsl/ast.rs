//! Abstract Syntax Tree types for the scene DSL.

/// Complete AST representation of a parsed scene.
///
/// Every directive is optional; unset values fall back to the crate
/// defaults when the [`Scene`](crate::scene::Scene) is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneAst {
    /// Display size in pixels (`.viewport`)
    pub viewport: Option<(usize, usize)>,
    /// Pixels per sample (`.downsample`)
    pub downsample: Option<usize>,
    /// Explicit sample grid (`.grid`)
    pub grid: Option<(usize, usize)>,
    /// Window center (`.center`)
    pub center: Option<(f64, f64)>,
    /// Window width in domain units (`.scale`)
    pub scale: Option<f64>,
    /// Relaxation factor (`.omega`)
    pub omega: Option<f64>,
    /// Convergence threshold (`.maxerror`)
    pub max_error: Option<f64>,
    /// Heatmap full scale (`.maxpot`)
    pub max_potential: Option<f64>,
    /// Boundary regions in file order
    pub regions: Vec<RegionDef>,
}

impl SceneAst {
    /// Create a new empty scene AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A boundary region from the DSL.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDef {
    /// Unique region name
    pub name: String,
    /// Top-left corner `(x, y)`
    pub tl: (f64, f64),
    /// Bottom-right corner `(x, y)`
    pub br: (f64, f64),
    /// Fixed potential
    pub potential: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// Scene directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Viewport,
    Downsample,
    Grid,
    Center,
    Scale,
    Omega,
    MaxError,
    MaxPotential,
}

impl Directive {
    /// Parse a directive from its DSL name, leading '.' included.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            ".viewport" => Some(Self::Viewport),
            ".downsample" => Some(Self::Downsample),
            ".grid" => Some(Self::Grid),
            ".center" | ".centre" => Some(Self::Center),
            ".scale" => Some(Self::Scale),
            ".omega" => Some(Self::Omega),
            ".maxerror" => Some(Self::MaxError),
            ".maxpot" => Some(Self::MaxPotential),
            _ => None,
        }
    }

    /// Number of numeric arguments the directive takes.
    pub fn arg_count(&self) -> usize {
        match self {
            Self::Viewport | Self::Grid | Self::Center => 2,
            Self::Downsample | Self::Scale | Self::Omega | Self::MaxError | Self::MaxPotential => 1,
        }
    }
}

/// Keywords that introduce a boundary region line.
pub fn is_region_keyword(word: &str) -> bool {
    matches!(word.to_ascii_uppercase().as_str(), "RECT" | "REGION")
}
