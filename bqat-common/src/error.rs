//! Common error types for the BQAT adapter

use thiserror::Error;

/// Common result type for BQAT operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared across BQAT crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input data or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required input data missing from the request
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
