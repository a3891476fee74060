use crate::grid::{Bounds, Cell};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell {cell} is outside the {}x{} board", .bounds.cols, .bounds.rows)]
    OutOfBounds { cell: Cell, bounds: Bounds },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("snake has no segments")]
    EmptySnake,
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
