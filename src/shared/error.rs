//! Shared Error Types
//!
//! This module defines error types that are shared between the identity core
//! and the HTTP backend.
//!
//! # Error Categories
//!
//! - `ValidationError` - Field shape validation failures
//!
//! # Usage
//!
//! ```rust
//! use idgate::shared::error::SharedError;
//!
//! // Create a validation error
//! let error = SharedError::validation("name", "Name must be 2-30 characters");
//! ```
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Field validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
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
}
