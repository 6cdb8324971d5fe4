//! Unified error type for the GPU allocation optimizer.
//!
//! This module provides a common error type [`GaoError`] that can represent
//! errors from any part of the system — input validation, JSON transport, and
//! the solver backend — handled uniformly at API boundaries.
//!
//! # Example
//!
//! ```ignore
//! use gao_core::{GaoError, GaoResult};
//!
//! fn run(path: &str) -> GaoResult<()> {
//!     let input = load_input(path)?;
//!     validate(&input)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all optimizer operations.
#[derive(Error, Debug)]
pub enum GaoError {
    /// I/O errors (file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input bundle failed validation before encoding (§7 kind 2)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The modeling backend raised an error while solving (§7 kind 3)
    #[error("Solver error: {0}")]
    Solver(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using GaoError.
pub type GaoResult<T> = Result<T, GaoError>;

impl From<anyhow::Error> for GaoError {
    fn from(err: anyhow::Error) -> Self {
        GaoError::Other(err.to_string())
    }
}

impl From<String> for GaoError {
    fn from(s: String) -> Self {
        GaoError::Other(s)
    }
}

impl From<&str> for GaoError {
    fn from(s: &str) -> Self {
        GaoError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for GaoError {
    fn from(err: serde_json::Error) -> Self {
        GaoError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GaoError::Solver("no feasible branch found".into());
        assert!(err.to_string().contains("Solver error"));
        assert!(err.to_string().contains("no feasible branch found"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let gao_err: GaoError = io_err.into();
        assert!(matches!(gao_err, GaoError::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn example_fn() -> GaoResult<i32> {
            Ok(42)
        }
        assert_eq!(example_fn().unwrap(), 42);
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> GaoResult<()> {
            Err(GaoError::Validation("test".into()))
        }

        fn outer() -> GaoResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
