//! # Error Types
//!
//! Domain-specific error types for agropos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  agropos-core errors (this file)                                        │
//! │  ├── CoreError        - Cart/domain errors                              │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  agropos-services errors (separate crate)                               │
//! │  └── ServiceError     - Catalog/sale-submission failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → Front-end           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every failure here is local and recoverable - nothing is fatal

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart engine and domain logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity on a line exceeds the stock captured in its product snapshot.
    ///
    /// The cart never raises this itself; stock problems surface through
    /// [`crate::Cart::validate_stock`] as an advisory list. This variant
    /// exists for callers that want to promote an advisory into a hard stop
    /// at checkout.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: String,
        requested: String,
    },

    /// No cart line with the given product id.
    ///
    /// Update/remove on an unknown id is a no-op at the engine level; this
    /// variant is for callers that need to report the miss.
    #[error("No cart line for product: {0}")]
    LineNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input does not meet the engine's preconditions.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric barcode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A unit-type product was given a fractional quantity.
    #[error("{name} is sold by unit and cannot have a fractional quantity")]
    FractionalQuantity { name: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Ração Bovina 25kg".to_string(),
            available: "3".to_string(),
            requested: "5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Ração Bovina 25kg: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::FractionalQuantity {
            name: "Enxada".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Enxada is sold by unit and cannot have a fractional quantity"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
