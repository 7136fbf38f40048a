//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an expense payload is rejected.
//! - [`NotFound`] thrown when no expense has the requested id.
//! - [`Storage`] thrown when the expense collection cannot be read or written.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`NotFound`]: EngineError::NotFound
//!  [`Storage`]: EngineError::Storage
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("Expense {0} not found")]
    NotFound(u64),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Returns `true` for failures of the storage backend rather than of the
    /// request itself.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Json(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
