//! Error types for the calculator SDK.

use thiserror::Error;

use crate::models::SessionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Calculator session not found: {id}")]
    NotFound { id: SessionId },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Too many active calculator sessions")]
    CapacityExceeded,
}

impl CalculatorError {
    #[must_use]
    pub fn not_found(id: SessionId) -> Self {
        Self::NotFound { id }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Returned when an operation tag is not one of `add`, `subtract`, `multiply`, `divide`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported operation: {tag}")]
pub struct ParseOperationError {
    pub tag: String,
}
