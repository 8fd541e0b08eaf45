//! Configuration errors
//!
//! Everything here is fatal and reported once at startup. A ball falling off
//! the board is a game outcome, see [`crate::sim::FailureCause`].

/// Malformed puzzle configuration or missing host bindings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid is empty")]
    EmptyGrid,
    #[error("grid row {row} has {found} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("start ({row}, {col}) is outside the {rows}x{cols} grid")]
    StartOutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
    #[error("start must be a [row, col] pair")]
    MalformedStart,
    #[error("invalid puzzle json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("missing configuration `{0}`")]
    MissingConfig(&'static str),
    #[error("missing page element #{0}")]
    MissingElement(&'static str),
    #[error("host error: {0}")]
    Host(String),
}
