//! Shared Error Types
//!
//! This module defines error types that do not depend on the server stack.
//! They describe why a piece of user input was rejected and are turned into
//! HTTP responses by the backend.
//!
//! # Error Categories
//!
//! - `ValidationError` - A single field failed validation
//! - `InvalidInput` - One or more fields failed validation at once
//!
//! # Usage
//!
//! ```rust
//! use minilink::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Please enter a valid email");
//! assert_eq!(error.field_errors().len(), 1);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected input field and the reason it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field as the client sent it
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error for a single field
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Several fields failed validation
    #[error("Validation failed for {} field(s)", errors.len())]
    InvalidInput {
        /// Every failure, in the order the checks ran
        errors: Vec<FieldError>,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flatten into the list of field errors reported to the client
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::ValidationError { field, message } => vec![FieldError::new(field, message)],
            Self::InvalidInput { errors } => errors.clone(),
        }
    }
}

impl From<Vec<FieldError>> for SharedError {
    fn from(mut errors: Vec<FieldError>) -> Self {
        if errors.len() == 1 {
            let FieldError { field, message } = errors.remove(0);
            Self::ValidationError { field, message }
        } else {
            Self::InvalidInput { errors }
        }
    }
}
