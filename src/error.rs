use std::path::PathBuf;

use thiserror::Error;

use crate::selector::{Game, Strategy};

/// Errors that can occur during a search.
///
/// Having no legal move is not an error; searches report it as `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search cancelled before completion")]
    Cancelled,

    #[error("{strategy:?} search is not available for {game:?}")]
    Unsupported { game: Game, strategy: Strategy },
}

/// Errors raised while loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("positional table must have {expected} entries, got {actual}")]
    InvalidWeights { expected: usize, actual: usize },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Errors raised when reading a board from its text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unexpected character {0:?}")]
    InvalidCell(char),
}
