//! Error types for surface fitting and G-code correction.
//!
//! Every failure the core can signal is classified here; nothing is retried
//! or swallowed. The CLI layer wraps these in `anyhow` for reporting.

use std::io;
use thiserror::Error;

use crate::gcode::Axis;

/// Errors that can occur during surface fitting and G-code correction.
#[derive(Error, Debug)]
pub enum Error {
    /// A spatial index was requested over an empty sample set.
    #[error("Cannot build a spatial index from an empty surface map")]
    EmptyInput,

    /// A normalization source range has zero width.
    #[error("Cannot normalize {axis} axis: observed range has zero width")]
    DegenerateRange { axis: Axis },

    /// The requested grid dimension is too small to span a range.
    #[error("Invalid grid size {size}: must be at least 2")]
    InvalidGridSize { size: usize },

    /// A surface map line did not parse as three comma-separated numbers.
    #[error("Malformed surface sample on line {line}: {reason}")]
    MalformedSample { line: usize, reason: String },

    /// Fit or correction was requested before its inputs were loaded.
    #[error("Missing prerequisite: {what}")]
    MissingPrerequisite { what: &'static str },

    /// I/O error while loading input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
