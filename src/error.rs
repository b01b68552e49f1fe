//! Error types for the library.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected polygon input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Flat coordinate lists must hold x/y pairs.
    #[error("odd coordinate count {0}; coordinates must come in x/y pairs")]
    OddCoordinateCount(usize),
    /// A closed polygon needs at least three vertices.
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    /// NaN or infinite vertex.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}

/// Rejected ray-cast parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RaycastError {
    #[error("max ray length must be finite and positive, got {0}")]
    InvalidMaxLength(f64),
}

/// Failure loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
