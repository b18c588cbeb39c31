//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  till-core errors (this file)                                       │
//! │  ├── CoreError        - Domain errors (discount codes, checkout)    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → transport shell → client       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is an explicit `Result` value; the core never panics on bad
//! input, and a rejected operation leaves the store unchanged.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The two discount-code failures are distinguished so the storefront can
/// tell a mistyped code from a spent one.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No discount code with this value was ever issued.
    #[error("Invalid discount code: {0}")]
    CodeNotFound(String),

    /// The code exists but was already consumed by an earlier checkout.
    #[error("Discount code {0} has already been used")]
    CodeAlreadyUsed(String),

    /// Code generation kept colliding with issued codes.
    ///
    /// Fatal configuration error: unreachable while the code space
    /// (36^length) dwarfs the number of issued codes.
    #[error("Discount code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur before any state mutation; a checkout that fails validation
/// leaves the ledger and the registry exactly as they were.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Checkout was attempted with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded the maximum number of distinct line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed discount code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
    fn test_discount_error_messages() {
        let err = CoreError::CodeNotFound("NOPE".to_string());
        assert_eq!(err.to_string(), "Invalid discount code: NOPE");

        let err = CoreError::CodeAlreadyUsed("SAVE1234".to_string());
        assert_eq!(
            err.to_string(),
            "Discount code SAVE1234 has already been used"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::EmptyCart.to_string(), "Cart is empty");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
