//! # Core Error Types
//!
//! Error types for pure cart logic.
//!
//! ## Error Philosophy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    What Is And Is Not An Error                          │
//! │                                                                         │
//! │  ERRORS (this module)              OUTCOMES (cart module)               │
//! │  ────────────────────              ───────────────────────              │
//! │  Blank product name                Quantity already at ceiling          │
//! │  Negative price                    Item from a different seller         │
//! │  maxQuantity below 1               Removing an absent item              │
//! │  Non-positive seller id            Setting quantity of absent item      │
//! │                                                                         │
//! │  Malformed INPUT is rejected.      Legitimate cart STATES resolve to    │
//! │  The cart is left untouched.       outcome codes, never errors.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate panics and nothing here is fatal: the only
//! rejection surface is a malformed catalog descriptor at the `add`
//! boundary.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for pure cart logic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A field-level validation failure.
///
/// ## Design Principles
/// - Each variant names the offending field so the storefront can
///   highlight it
/// - Messages are human-readable as-is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or missing.
    #[error("{field} is required")]
    Required { field: String },

    /// A string field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A numeric field fell outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A numeric field must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A numeric field must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// A field had the wrong shape.
    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");

        let err = ValidationError::MustBePositive {
            field: "maxQuantity".to_string(),
        };
        assert_eq!(err.to_string(), "maxQuantity must be positive");

        let err = ValidationError::InvalidFormat {
            field: "quantities".to_string(),
            reason: "length must match productId".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "quantities is invalid: length must match productId"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        }
        .into();

        // Transparent: the message passes through unchanged.
        assert_eq!(err.to_string(), "price must not be negative");
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
