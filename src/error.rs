//! Custom error types for tallybook
//!
//! This module defines the error hierarchy for the store using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tallybook operations
#[derive(Error, Debug)]
pub enum TallybookError {
    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Invariant conflicts: duplicate keys or unresolvable references
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backing-file read/write and lock failures
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TallybookError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
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

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TallybookError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TallybookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type alias for tallybook operations
pub type TallybookResult<T> = Result<T, TallybookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TallybookError::Validation("amount must be positive".into());
        assert_eq!(err.to_string(), "Validation error: amount must be positive");
    }

    #[test]
    fn test_not_found_error() {
        let err = TallybookError::category_not_found("42");
        assert_eq!(err.to_string(), "Category not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_conflict_error() {
        let err = TallybookError::Conflict("category already exists".into());
        assert_eq!(err.to_string(), "Conflict: category already exists");
        assert!(err.is_conflict());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TallybookError = io_err.into();
        assert!(matches!(err, TallybookError::Storage(_)));
    }
}
