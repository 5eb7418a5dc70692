//! Error types for the relaxation solver.
//!
//! This module provides a unified error type [`RelaxError`] that covers
//! all error conditions that can occur during scene parsing, scene setup,
//! field access and output.

use thiserror::Error;

use crate::scene::Coordinate;

/// Result type alias using [`RelaxError`].
pub type Result<T> = std::result::Result<T, RelaxError>;

/// Unified error type for all relaxation operations.
#[derive(Error, Debug)]
pub enum RelaxError {
    // ============ Scene DSL Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Duplicate region name
    #[error("Duplicate region name '{name}'")]
    DuplicateRegion { name: String },

    // ============ Scene Setup Errors ============
    /// Region corners violate the top-left / bottom-right ordering
    #[error("Invalid region '{region}': top-left {tl} must be left of and above bottom-right {br}")]
    InvalidRegion {
        region: String,
        tl: Coordinate,
        br: Coordinate,
    },

    /// Grid has a zero dimension or is too large to store
    #[error("Invalid grid size {width}x{height}: empty or too large")]
    InvalidGrid { width: usize, height: usize },

    /// Invalid scene parameter
    #[error("Invalid scene parameter: {message}")]
    InvalidSceneParam { message: String },

    // ============ Field Errors ============
    /// Sample index outside the grid
    #[error("Sample ({i}, {j}) is outside the {width}x{height} field")]
    OutOfBounds {
        i: usize,
        j: usize,
        width: usize,
        height: usize,
    },

    // ============ I/O Errors ============
    /// Error reading scene file
    #[error("Failed to read scene file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing field or history output
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl RelaxError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid scene parameter error
    pub fn scene_param(message: impl Into<String>) -> Self {
        Self::InvalidSceneParam {
            message: message.into(),
        }
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(i: usize, j: usize, width: usize, height: usize) -> Self {
        Self::OutOfBounds {
            i,
            j,
            width,
            height,
        }
    }
}
