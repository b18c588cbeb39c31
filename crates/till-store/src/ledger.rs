//! # Order Ledger
//!
//! The append-only sequence of finalized orders plus the monotonic checkout
//! counter, and the checkout orchestration against the discount registry.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Flow                               │
//! │                                                                     │
//! │  1. VALIDATE CART          (no mutation; reject → "Cart is empty")  │
//! │  2. COMPUTE SUBTOTAL                                                │
//! │  3. CONSUME CODE?          (the one fallible step with effects;     │
//! │                             reject → nothing else has happened)     │
//! │  4. APPEND ORDER           (fresh UUID, stamped, immutable)         │
//! │  5. INCREMENT COUNTER                                               │
//! │  6. COUNTER % N == 0?      → mint reward code into the receipt      │
//! │                                                                     │
//! │  Steps 3-6 are indivisible from other checkouts: the caller holds   │
//! │  the store lock for the whole sequence (see store::StoreState).     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregates are never tracked independently; [`OrderLedger::stats`] folds
//! over the live order sequence on every call.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use till_core::error::CoreResult;
use till_core::money::Money;
use till_core::types::{CheckoutReceipt, LineItem, Order, StoreStats};
use till_core::validation::validate_cart;

use crate::registry::DiscountRegistry;

// =============================================================================
// Order Ledger
// =============================================================================

/// Append-only order ledger with the store-wide checkout counter.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    /// Finalized orders, oldest first.
    orders: Vec<Order>,

    /// Incremented exactly once per successful checkout.
    order_count: u64,
}

impl OrderLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a cart into a finalized order.
    ///
    /// Validation and code consumption happen before any ledger mutation,
    /// so a rejected checkout leaves ledger and registry untouched. On the
    /// Nth order (N = `discount_interval`) a reward code is minted and
    /// returned in the receipt; it is never attached to the order record.
    ///
    /// A checkout may both consume a supplied code and earn a fresh one;
    /// the two events are independent.
    pub fn checkout(
        &mut self,
        registry: &mut DiscountRegistry,
        items: Vec<LineItem>,
        discount_code: Option<&str>,
        discount_interval: u64,
    ) -> CoreResult<CheckoutReceipt> {
        validate_cart(&items)?;

        let subtotal: Money = items.iter().map(LineItem::line_total).sum();

        // The one fallible step with side effects. After this point the
        // checkout cannot be rejected.
        let (discount, used_code) = match discount_code {
            Some(code) => {
                registry.consume(code)?;
                let discount = subtotal.calculate_discount(registry.rate());
                debug!(code = %code, discount = %discount, "Discount code consumed");
                (discount, Some(code.to_string()))
            }
            None => (Money::zero(), None),
        };

        let total = subtotal - discount;
        let total_items: i64 = items.iter().map(|i| i.quantity).sum();

        let order = Order {
            id: Uuid::new_v4().to_string(),
            items,
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
            total_items,
            discount_code: used_code,
            created_at: Utc::now(),
        };
        let order_id = order.id.clone();
        self.orders.push(order);

        self.order_count += 1;

        // Sole trigger for automatic minting, checked once per checkout
        // right after the increment. The reward is for the next purchase.
        let new_discount_code = if self.order_count % discount_interval == 0 {
            let minted = registry.mint()?;
            info!(order_count = self.order_count, code = %minted.code, "Reward code minted");
            Some(minted.code)
        } else {
            None
        };

        info!(
            order_id = %order_id,
            total = %total,
            order_count = self.order_count,
            "Order placed"
        );

        Ok(CheckoutReceipt {
            order_id,
            subtotal_cents: subtotal.cents(),
            discount_cents: discount.cents(),
            total_cents: total.cents(),
            total_items,
            new_discount_code,
        })
    }

    /// All finalized orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The raw checkout counter.
    #[inline]
    pub fn order_count(&self) -> u64 {
        self.order_count
    }

    /// Aggregate snapshot: a fresh fold over the live order sequence.
    pub fn stats(&self, registry: &DiscountRegistry) -> StoreStats {
        let total_revenue: Money = self.orders.iter().map(Order::total).sum();
        let total_discount: Money = self.orders.iter().map(Order::discount).sum();

        StoreStats {
            total_orders: self.orders.len() as u64,
            total_items: self.orders.iter().map(|o| o.total_items).sum(),
            total_revenue_cents: total_revenue.cents(),
            total_discount_cents: total_discount.cents(),
            discount_codes: registry.code_values(),
            order_count: self.order_count,
        }
    }

    /// Clears the ledger and zeroes the counter. Full store reset only.
    pub fn reset(&mut self) {
        self.orders.clear();
        self.order_count = 0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::error::CoreError;
    use till_core::types::DiscountRate;
    use till_core::{DEFAULT_CODE_LENGTH, DEFAULT_DISCOUNT_INTERVAL};

    fn registry() -> DiscountRegistry {
        DiscountRegistry::new(DEFAULT_CODE_LENGTH, DiscountRate::default())
    }

    fn item(price_cents: i64, quantity: i64) -> LineItem {
        LineItem {
            product_id: "p-1".to_string(),
            product_name: "Widget".to_string(),
            unit_price_cents: price_cents,
            quantity,
        }
    }

    fn checkout_plain(ledger: &mut OrderLedger, registry: &mut DiscountRegistry) -> CheckoutReceipt {
        ledger
            .checkout(
                registry,
                vec![item(10000, 1)],
                None,
                DEFAULT_DISCOUNT_INTERVAL,
            )
            .unwrap()
    }

    #[test]
    fn test_checkout_totals_without_code() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();

        let receipt = ledger
            .checkout(
                &mut registry,
                vec![item(10000, 2)],
                None,
                DEFAULT_DISCOUNT_INTERVAL,
            )
            .unwrap();

        assert_eq!(receipt.subtotal_cents, 20000);
        assert_eq!(receipt.discount_cents, 0);
        assert_eq!(receipt.total_cents, 20000);
        assert_eq!(receipt.total_items, 2);
        assert_eq!(receipt.new_discount_code, None); // 1 mod 3 != 0
        assert_eq!(ledger.order_count(), 1);
    }

    #[test]
    fn test_every_third_checkout_mints_reward() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();

        let first = checkout_plain(&mut ledger, &mut registry);
        let second = checkout_plain(&mut ledger, &mut registry);
        let third = checkout_plain(&mut ledger, &mut registry);

        assert!(first.new_discount_code.is_none());
        assert!(second.new_discount_code.is_none());
        let code = third.new_discount_code.expect("third order earns a code");
        assert_eq!(code.len(), DEFAULT_CODE_LENGTH);

        // Exactly one code minted, and it is not attached to any order.
        assert_eq!(registry.len(), 1);
        assert!(ledger.orders().iter().all(|o| o.discount_code.is_none()));

        // The next threshold is the sixth order.
        let fourth = checkout_plain(&mut ledger, &mut registry);
        let fifth = checkout_plain(&mut ledger, &mut registry);
        let sixth = checkout_plain(&mut ledger, &mut registry);
        assert!(fourth.new_discount_code.is_none());
        assert!(fifth.new_discount_code.is_none());
        assert!(sixth.new_discount_code.is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_checkout_consumes_code_and_discounts() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();
        let code = registry.mint().unwrap();

        let receipt = ledger
            .checkout(
                &mut registry,
                vec![item(10000, 1)],
                Some(&code.code),
                DEFAULT_DISCOUNT_INTERVAL,
            )
            .unwrap();

        assert_eq!(receipt.subtotal_cents, 10000);
        assert_eq!(receipt.discount_cents, 1000);
        assert_eq!(receipt.total_cents, 9000);

        let order = &ledger.orders()[0];
        assert_eq!(order.discount_code.as_deref(), Some(code.code.as_str()));
        assert!(registry.codes()[0].is_used);
    }

    #[test]
    fn test_rejected_checkout_leaves_no_trace() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();

        // Empty cart.
        let result = ledger.checkout(&mut registry, vec![], None, DEFAULT_DISCOUNT_INTERVAL);
        assert!(matches!(result, Err(CoreError::Validation(_))));

        // Unknown code.
        let result = ledger.checkout(
            &mut registry,
            vec![item(100, 1)],
            Some("NOPE"),
            DEFAULT_DISCOUNT_INTERVAL,
        );
        assert!(matches!(result, Err(CoreError::CodeNotFound(_))));

        // Bad quantity.
        let result = ledger.checkout(
            &mut registry,
            vec![item(100, 0)],
            None,
            DEFAULT_DISCOUNT_INTERVAL,
        );
        assert!(matches!(result, Err(CoreError::Validation(_))));

        assert_eq!(ledger.order_count(), 0);
        assert!(ledger.orders().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_code_does_not_burn_cart_validation_order() {
        // A cart with a used code: the code must be rejected without the
        // order being created.
        let mut ledger = OrderLedger::new();
        let mut registry = registry();
        let code = registry.mint().unwrap();
        registry.consume(&code.code).unwrap();

        let result = ledger.checkout(
            &mut registry,
            vec![item(100, 1)],
            Some(&code.code),
            DEFAULT_DISCOUNT_INTERVAL,
        );
        assert!(matches!(result, Err(CoreError::CodeAlreadyUsed(_))));
        assert_eq!(ledger.order_count(), 0);
    }

    #[test]
    fn test_consume_and_mint_in_same_checkout() {
        // Third checkout supplies a code: it is consumed AND a reward is
        // minted; the two events are independent.
        let mut ledger = OrderLedger::new();
        let mut registry = registry();
        let code = registry.mint().unwrap();

        checkout_plain(&mut ledger, &mut registry);
        checkout_plain(&mut ledger, &mut registry);

        let receipt = ledger
            .checkout(
                &mut registry,
                vec![item(10000, 1)],
                Some(&code.code),
                DEFAULT_DISCOUNT_INTERVAL,
            )
            .unwrap();

        assert_eq!(receipt.discount_cents, 1000);
        let reward = receipt.new_discount_code.expect("third order earns a code");
        assert_ne!(reward, code.code);
    }

    #[test]
    fn test_stats_equal_fold_over_orders() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();
        let code = registry.mint().unwrap();

        ledger
            .checkout(
                &mut registry,
                vec![item(10000, 2), item(500, 3)],
                None,
                DEFAULT_DISCOUNT_INTERVAL,
            )
            .unwrap();
        ledger
            .checkout(
                &mut registry,
                vec![item(10000, 1)],
                Some(&code.code),
                DEFAULT_DISCOUNT_INTERVAL,
            )
            .unwrap();

        let stats = ledger.stats(&registry);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_items, 6);
        // 21500 + 9000
        assert_eq!(stats.total_revenue_cents, 30500);
        assert_eq!(stats.total_discount_cents, 1000);
        assert_eq!(stats.order_count, 2);
        assert_eq!(stats.discount_codes, registry.code_values());

        // Recomputed fold matches the DTO exactly.
        let revenue: i64 = ledger.orders().iter().map(|o| o.total_cents).sum();
        let discount: i64 = ledger.orders().iter().map(|o| o.discount_cents).sum();
        let items: i64 = ledger.orders().iter().map(|o| o.total_items).sum();
        assert_eq!(stats.total_revenue_cents, revenue);
        assert_eq!(stats.total_discount_cents, discount);
        assert_eq!(stats.total_items, items);
    }

    #[test]
    fn test_order_ids_are_unique() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();

        for _ in 0..10 {
            checkout_plain(&mut ledger, &mut registry);
        }

        let mut ids: Vec<_> = ledger.orders().iter().map(|o| o.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_reset_zeroes_counter_and_orders() {
        let mut ledger = OrderLedger::new();
        let mut registry = registry();

        for _ in 0..4 {
            checkout_plain(&mut ledger, &mut registry);
        }
        assert_eq!(ledger.order_count(), 4);

        ledger.reset();
        assert_eq!(ledger.order_count(), 0);
        assert!(ledger.orders().is_empty());

        // Counting restarts: the next threshold is three more orders away.
        checkout_plain(&mut ledger, &mut registry);
        let receipt = checkout_plain(&mut ledger, &mut registry);
        assert!(receipt.new_discount_code.is_none());
    }
}
