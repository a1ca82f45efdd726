//! # Service Error Types
//!
//! Failures at the external-collaborator boundary. Everything here is
//! recoverable: the cart stays intact, the cashier adjusts and retries.

use agropos_core::CoreError;
use thiserror::Error;

/// Errors from the catalog, sale-submission, or checkout-session layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Finalization requested on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Stock validation failed at finalization time.
    ///
    /// Carries the advisory messages from the cart engine so the UI can
    /// show one line per offending product.
    #[error("Insufficient stock: {}", errors.join("; "))]
    InsufficientStock { errors: Vec<String> },

    /// Catalog has no product with the given id or barcode.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The sale-submission backend rejected or failed the request.
    #[error("Sale submission failed: {0}")]
    Submission(String),

    /// Domain error bubbling up from the cart engine.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_joins_errors() {
        let err = ServiceError::InsufficientStock {
            errors: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "Insufficient stock: first; second");
    }

    #[test]
    fn test_core_error_converts() {
        let core = CoreError::LineNotFound("p-1".to_string());
        let service: ServiceError = core.into();
        assert!(matches!(service, ServiceError::Core(_)));
    }
}
