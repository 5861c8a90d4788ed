//! Path-subsystem error type.

use thiserror::Error;

/// Errors produced by `fc-path`.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path '{name}' has {count} waypoints; at least 2 are required for following")]
    TooFewWaypoints { name: String, count: usize },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathResult<T> = Result<T, PathError>;
