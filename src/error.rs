//! Error type shared by the edge-list I/O layer and the exact solver guards.
//!
//! Missing edges, infeasible tours and incomplete heuristic tours are not
//! errors: solvers report them through their return values.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("malformed edge on line {line}: {message}")]
    MalformedLine { line: u64, message: String },
    #[error("graph has {vertices} vertices, exact search is limited to {limit}")]
    TooManyVertices { vertices: usize, limit: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
