// src/input/error.rs

use thiserror::Error;

/// Errors raised while loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value {value} for parameter {name}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("unsupported number of dimensions: {0}")]
    UnsupportedDimensions(usize),
    #[error("at least one tracer species is required")]
    NoTracers,
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("unsupported physics module: {0}")]
    UnsupportedPhysics(String),
    #[error("grid does not match the configuration: {0}")]
    GridMismatch(String),
}
