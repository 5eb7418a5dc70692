//! DSL (Domain Specific Language) parser for scene descriptions.
//!
//! This module provides a small line-oriented language for describing a
//! relaxation scene: the sample grid, the viewed window, solver tunables and
//! the fixed-potential regions.
//!
//! # Grammar Overview
//!
//! ```text
//! scene       = { line }
//! line        = comment | directive | region | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' directive_name number { number }
//! region      = ("RECT" | "REGION") name tl_x tl_y br_x br_y potential
//!
//! directive_name = "viewport" | "downsample" | "grid" | "center"
//!                | "scale" | "omega" | "maxerror" | "maxpot"
//! name        = identifier
//!
//! number      = ['-'|'+'] digit* ['.' digit+] [('e'|'E') ['-'|'+'] digit+] [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .viewport | Display size in pixels | `.viewport <w> <h>` |
//! | .downsample | Pixels per sample | `.downsample <n>` |
//! | .grid | Sample grid, overrides viewport / downsample | `.grid <W> <H>` |
//! | .center | Window center | `.center <x> <y>` |
//! | .scale | Window width in domain units | `.scale <s>` |
//! | .omega | Relaxation factor | `.omega <w>` |
//! | .maxerror | Convergence threshold | `.maxerror <e>` |
//! | .maxpot | Heatmap full scale | `.maxpot <p>` |
//!
//! Regions are listed in precedence order: where two overlap, the one
//! written first wins.
//!
//! # Example
//!
//! ```text
//! # Charged plate between two grounded electrodes
//! .viewport 800 500
//! .downsample 2
//! .center 15 0
//! .scale 50
//!
//! RECT anode  -5  5  5  -5 100k
//! RECT upper  30 20 35   2 0
//! RECT lower  30 -2 35 -20 0
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a scene DSL string into an AST.
pub fn parse(input: &str) -> Result<SceneAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a scene DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<SceneAst> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::RelaxError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}
