//! Error types for the teller ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum TellerError {
    /// A field-level check on an entity failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity lookup failed
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity with the same identifying field already exists
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// An operation was given an unusable client reference
    #[error("Reference error: {0}")]
    Reference(String),

    /// Terminal I/O errors from the prompt loop
    #[error("I/O error: {0}")]
    Io(String),
}

impl TellerError {
    /// Create a "not found" error for an arbitrary entity kind
    pub fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for clients
    pub fn client_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Client", identifier)
    }

    /// Create a "not found" error for operations
    pub fn operation_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Operation", identifier)
    }

    /// Create a duplicate-client error
    pub fn duplicate_client(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Client",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TellerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type TellerResult<T> = Result<T, TellerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = TellerError::Validation("amount must not be negative".into());
        assert_eq!(
            err.to_string(),
            "Validation error: amount must not be negative"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = TellerError::client_not_found("Alice");
        assert_eq!(err.to_string(), "Client not found: Alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_error() {
        let err = TellerError::duplicate_client("Alice");
        assert_eq!(err.to_string(), "Client already exists: Alice");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: TellerError = io_err.into();
        assert!(matches!(err, TellerError::Io(_)));
    }
}
