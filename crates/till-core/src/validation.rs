//! # Validation Module
//!
//! Input validation for carts and discount codes.
//!
//! Every validator runs before any state mutation: a cart that fails here
//! is rejected before any order exists and before any code is consumed.
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{validate_cart, validate_quantity};
//! use till_core::types::LineItem;
//!
//! let cart = vec![LineItem {
//!     product_id: "p-1".into(),
//!     product_name: "Widget".into(),
//!     unit_price_cents: 1099,
//!     quantity: 2,
//! }];
//!
//! assert!(validate_cart(&cart).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::LineItem;
use crate::{CODE_ALPHABET, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates an entire cart ahead of checkout.
///
/// ## Rules
/// - Must contain at least one line item
/// - Must not exceed [`MAX_CART_ITEMS`] distinct items
/// - Every line item must pass [`validate_line_item`]
pub fn validate_cart(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    if items.len() > MAX_CART_ITEMS {
        return Err(ValidationError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    for item in items {
        validate_line_item(item)?;
    }

    Ok(())
}

/// Validates a single line item.
///
/// ## Rules
/// - Product id and name must be present
/// - Unit price must be non-negative
/// - Quantity must be positive and within bounds
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    if item.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    validate_product_name(&item.product_name)?;
    validate_price_cents(item.unit_price_cents)?;
    validate_quantity(item.quantity)?;

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Discount Code Validators
// =============================================================================

/// Validates the shape of a discount code.
///
/// ## Rules
/// - Exactly `expected_len` characters
/// - Drawn from the code alphabet (uppercase letters and digits)
///
/// Transport shells can use this to pre-screen input; registry lookups do
/// not, because an unknown code must report "not found" regardless of shape.
pub fn validate_code_format(code: &str, expected_len: usize) -> ValidationResult<()> {
    if code.len() != expected_len {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: format!("must be exactly {} characters", expected_len),
        });
    }

    if !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price_cents: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: "p-1".to_string(),
            product_name: "Widget".to_string(),
            unit_price_cents: price_cents,
            quantity,
        }
    }

    #[test]
    fn test_validate_cart_rejects_empty() {
        assert!(matches!(
            validate_cart(&[]),
            Err(ValidationError::EmptyCart)
        ));
    }

    #[test]
    fn test_validate_cart_accepts_normal_cart() {
        let cart = vec![item(10000, 2), item(500, 1)];
        assert!(validate_cart(&cart).is_ok());
    }

    #[test]
    fn test_validate_cart_rejects_oversized() {
        let cart: Vec<LineItem> = (0..=MAX_CART_ITEMS).map(|_| item(100, 1)).collect();
        assert!(matches!(
            validate_cart(&cart),
            Err(ValidationError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_line_item_requires_ids() {
        let mut bad = item(100, 1);
        bad.product_id = "  ".to_string();
        assert!(validate_line_item(&bad).is_err());

        let mut bad = item(100, 1);
        bad.product_name = String::new();
        assert!(validate_line_item(&bad).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok()); // Free item
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_code_format() {
        assert!(validate_code_format("ABCD1234", 8).is_ok());
        assert!(validate_code_format("abcd1234", 8).is_err()); // lowercase
        assert!(validate_code_format("ABC123", 8).is_err()); // too short
        assert!(validate_code_format("ABCD-234", 8).is_err()); // bad char
    }
}
