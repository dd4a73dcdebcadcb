//! Error types for gridcaster

use thiserror::Error;

/// Crate error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Grid has no cells")]
    EmptyGrid,

    #[error("Grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown map character {ch:?} at row {row}, column {col}")]
    InvalidMapChar { row: usize, col: usize, ch: char },

    #[error("Distance must be positive, got {0}")]
    NonPositiveDistance(f32),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
