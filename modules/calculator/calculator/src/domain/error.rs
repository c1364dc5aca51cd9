use calculator_sdk::{CalculatorError, SessionId};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Calculator session not found: {id}")]
    NotFound { id: SessionId },

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Session limit of {limit} reached")]
    CapacityExceeded { limit: usize },
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for CalculatorError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { id } => Self::not_found(id),
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::CapacityExceeded { .. } => Self::CapacityExceeded,
        }
    }
}
