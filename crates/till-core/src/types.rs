//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │    LineItem     │   │     Order       │   │  DiscountCode   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  product_id     │   │  id (UUID)      │   │  code (8 chars) │   │
//! │  │  product_name   │   │  items          │   │  is_used        │   │
//! │  │  unit_price     │   │  subtotal/total │   │  generated_at   │   │
//! │  │  quantity       │   │  discount       │   └─────────────────┘   │
//! │  └─────────────────┘   └─────────────────┘                         │
//! │                                                                     │
//! │  DTOs: CheckoutReceipt, DiscountQuote, StoreStats                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All DTOs serialize camelCase for the JS storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::DEFAULT_DISCOUNT_RATE_BPS;

// =============================================================================
// Discount Rate
// =============================================================================

/// Promotional discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Default is the store-wide promotional rate (10%).
impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate(DEFAULT_DISCOUNT_RATE_BPS)
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A single-use promotional discount code.
///
/// Minted either automatically (every Nth completed order) or manually by an
/// admin. `is_used` transitions to true exactly once and never reverts;
/// codes are only removed by a full store reset.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Opaque identifier, unique within the registry. Fixed length,
    /// uppercase letters and digits.
    pub code: String,

    /// Whether the code has been consumed by a checkout.
    pub is_used: bool,

    /// When the code was minted.
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

impl DiscountCode {
    /// Creates a freshly minted, unused code.
    pub fn new(code: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        DiscountCode {
            code: code.into(),
            is_used: false,
            generated_at,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item in a cart / order.
///
/// Product data is an opaque snapshot supplied by the caller; no catalog
/// exists in this core. Immutable once attached to an [`Order`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Opaque product identifier.
    pub product_id: String,

    /// Product name as shown to the customer.
    pub product_name: String,

    /// Unit price in cents. Non-negative (zero = free item).
    pub unit_price_cents: i64,

    /// Quantity ordered. Always positive.
    pub quantity: i64,
}

impl LineItem {
    /// Line total before discount (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A finalized, immutable order record.
///
/// Created atomically at successful checkout completion and appended to the
/// ledger; removed only by a full store reset. Totals are set once at
/// creation and never recomputed: `total = subtotal - discount`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Globally unique order id (UUID v4), never reused.
    pub id: String,

    /// The purchased line items. Never empty.
    pub items: Vec<LineItem>,

    /// Sum over items of price × quantity.
    pub subtotal_cents: i64,

    /// 0, or the promotional rate applied to the subtotal.
    pub discount_cents: i64,

    /// `subtotal - discount`.
    pub total_cents: i64,

    /// Sum of quantities across all items.
    pub total_items: i64,

    /// The discount code consumed for this order, if any.
    pub discount_code: Option<String>,

    /// When the order was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Checkout Receipt
// =============================================================================

/// The result of a successful checkout.
///
/// `new_discount_code` is the reward minted when this checkout pushed the
/// order counter to a multiple of the configured interval. It is a reward
/// for the *next* purchase: returned to the caller here, never attached to
/// the order record itself.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: String,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub total_items: i64,

    /// Freshly minted reward code, if this was the Nth order.
    pub new_discount_code: Option<String>,
}

// =============================================================================
// Discount Quote
// =============================================================================

/// The result of a read-only discount validation.
///
/// Quoting never consumes the code; only a completed checkout does.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    /// The validated code.
    pub code: String,

    /// Discount amount at the store rate, for the quoted cart total.
    pub discount_cents: i64,
}

// =============================================================================
// Store Stats
// =============================================================================

/// Aggregate snapshot for the admin surface.
///
/// Always computed as a fresh fold over the order ledger at the instant of
/// the call; there are no independently tracked aggregate counters to drift.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Number of orders in the ledger.
    pub total_orders: u64,

    /// Sum of item quantities across all orders.
    pub total_items: i64,

    /// Sum of order totals (after discount).
    pub total_revenue_cents: i64,

    /// Sum of discounts granted.
    pub total_discount_cents: i64,

    /// Every code ever issued (used and unused), in issuance order.
    pub discount_codes: Vec<String>,

    /// Raw checkout counter driving the Nth-order mint trigger.
    pub order_count: u64,
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
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(10.0);
        assert_eq!(rate.bps(), 1000);
    }

    #[test]
    fn test_discount_rate_default_is_ten_percent() {
        assert_eq!(DiscountRate::default().bps(), DEFAULT_DISCOUNT_RATE_BPS);
    }

    #[test]
    fn test_line_total() {
        let line = item(10000, 2);
        assert_eq!(line.line_total_cents(), 20000);
        assert_eq!(line.line_total().cents(), 20000);
    }

    #[test]
    fn test_new_discount_code_is_unused() {
        let code = DiscountCode::new("ABCD1234", Utc::now());
        assert!(!code.is_used);
        assert_eq!(code.code, "ABCD1234");
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            id: "o-1".to_string(),
            items: vec![item(100, 2)],
            subtotal_cents: 200,
            discount_cents: 0,
            total_cents: 200,
            total_items: 2,
            discount_code: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("subtotalCents").is_some());
        assert!(json.get("totalItems").is_some());
        assert!(json.get("discountCode").is_some());
        assert!(json.get("subtotal_cents").is_none());
    }

    #[test]
    fn test_receipt_serializes_reward_code() {
        let receipt = CheckoutReceipt {
            order_id: "o-1".to_string(),
            subtotal_cents: 10000,
            discount_cents: 1000,
            total_cents: 9000,
            total_items: 1,
            new_discount_code: Some("ZZZZ9999".to_string()),
        };

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["newDiscountCode"], "ZZZZ9999");
        assert_eq!(json["totalCents"], 9000);
    }
}
