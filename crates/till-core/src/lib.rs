//! # till-core: Pure Business Logic for Till
//!
//! This crate is the **heart** of Till. It contains all business logic for
//! order accounting and promotional discounts as pure functions and types
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Till Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │              Transport Shell (HTTP / Admin UI)              │   │
//! │  │        checkout, validate-discount, stats, reset            │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                 till-store (Store Engine)                   │   │
//! │  │      DiscountRegistry • OrderLedger • StoreState            │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐               │   │
//! │  │   │   types   │  │   money   │  │ validation│               │   │
//! │  │   │   Order   │  │   Money   │  │   rules   │               │   │
//! │  │   │  LineItem │  │ Discounts │  │   checks  │               │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘               │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, LineItem, DiscountCode, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::Money;
//! use till_core::types::DiscountRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(10000); // $100.00
//!
//! // Calculate the promotional discount
//! let rate = DiscountRate::from_bps(1000); // 10%
//! let discount = subtotal.calculate_discount(rate);
//!
//! assert_eq!(discount.cents(), 1000); // $10.00 off
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Every Nth completed order mints a fresh discount code.
///
/// The counter check runs once per checkout, immediately after the order
/// counter is incremented.
pub const DEFAULT_DISCOUNT_INTERVAL: u64 = 3;

/// Promotional discount rate in basis points (1000 = 10%).
pub const DEFAULT_DISCOUNT_RATE_BPS: u32 = 1000;

/// Length of a generated discount code, in characters.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Alphabet a discount code is drawn from: uppercase letters and digits.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Maximum distinct line items allowed in a single cart.
///
/// Prevents runaway carts and keeps checkout sizes reasonable.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
