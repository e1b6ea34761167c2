//! Errors reported by the library.
//!
//! Geometric edge cases (lines missing the volume, degenerate directions) are
//! not errors: they produce empty system matrix rows. What remains are
//! malformed inputs at the edges of the system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("volume needs at least one voxel along every axis, got {0:?}")]
    EmptyVolume(Vec<usize>),

    #[error("image data contains {got} voxels, but volume {lengths:?} needs {expected}")]
    ImageSize { lengths: Vec<usize>, expected: usize, got: usize },

    #[error("expected {expected} components, got {got}")]
    Dimension { expected: usize, got: usize },

    #[error("ray file line {line}: {message}")]
    RayParse { line: usize, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
