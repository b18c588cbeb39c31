//! # Store Façade and Shared Handle
//!
//! [`Store`] is the explicitly owned state object: configuration, discount
//! registry, and order ledger in one place, with no ambient globals.
//! [`StoreState`] wraps it in `Arc<Mutex<_>>` as the single synchronization
//! boundary.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple transport handlers may access/modify the store
//! 2. The whole validate-consume-append-increment-maybe-mint sequence must
//!    be indivisible per checkout
//! 3. Handlers can run concurrently
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Store Operations                               │
//! │                                                                     │
//! │  Shell Endpoint            Store Call              State Change     │
//! │  ──────────────            ──────────              ────────────     │
//! │                                                                     │
//! │  POST /checkout ─────────► checkout() ───────────► order appended,  │
//! │                                                    code consumed,   │
//! │                                                    maybe minted     │
//! │                                                                     │
//! │  POST /validate-discount ► validate_discount() ──► (read only)      │
//! │                                                                     │
//! │  POST /admin/generate ───► generate_discount_code► code minted      │
//! │                                                                     │
//! │  GET  /admin/stats ──────► stats() ──────────────► (read only)      │
//! │                                                                     │
//! │  GET  /admin/orders ─────► orders() ─────────────► (read only)      │
//! │                                                                     │
//! │  POST /admin/reset ──────► reset() ──────────────► everything gone  │
//! │                                                                     │
//! │  NOTE: All operations acquire the Mutex. Reads release it quickly.  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use till_core::error::CoreResult;
use till_core::money::Money;
use till_core::types::{CheckoutReceipt, DiscountCode, DiscountQuote, LineItem, Order, StoreStats};

use crate::config::StoreConfig;
use crate::ledger::OrderLedger;
use crate::registry::DiscountRegistry;

// =============================================================================
// Store
// =============================================================================

/// The in-memory store: config + discount registry + order ledger.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    registry: DiscountRegistry,
    ledger: OrderLedger,
}

impl Store {
    /// Creates a store from a validated configuration.
    pub fn new(config: StoreConfig) -> CoreResult<Self> {
        config.validate()?;

        let registry = DiscountRegistry::new(config.code_length, config.discount_rate());
        Ok(Store {
            config,
            registry,
            ledger: OrderLedger::new(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Converts a cart into a finalized order.
    ///
    /// See [`OrderLedger::checkout`] for the full contract. Callers holding
    /// a [`StoreState`] get the whole sequence under one lock.
    pub fn checkout(
        &mut self,
        items: Vec<LineItem>,
        discount_code: Option<&str>,
    ) -> CoreResult<CheckoutReceipt> {
        debug!(items = items.len(), code = ?discount_code, "checkout");

        self.ledger.checkout(
            &mut self.registry,
            items,
            discount_code,
            self.config.discount_interval,
        )
    }

    /// Quotes a discount code against a cart total without consuming it.
    pub fn validate_discount(&self, code: &str, cart_total: Money) -> CoreResult<DiscountQuote> {
        self.registry.validate(code, cart_total)
    }

    /// Admin mint: issues a fresh code immediately.
    ///
    /// Fully independent of the order counter; manual minting never affects
    /// the Nth-order reward schedule.
    pub fn generate_discount_code(&mut self) -> CoreResult<DiscountCode> {
        let code = self.registry.mint()?;
        info!(code = %code.code, "Discount code minted by admin");
        Ok(code)
    }

    /// All finalized orders, oldest first (admin listing).
    pub fn orders(&self) -> &[Order] {
        self.ledger.orders()
    }

    /// Aggregate snapshot, folded fresh from the ledger.
    pub fn stats(&self) -> StoreStats {
        self.ledger.stats(&self.registry)
    }

    /// Clears orders, codes, and the counter.
    ///
    /// Administrative/test path only, not part of the customer flow.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.registry.reset();
        info!("Store reset");
    }
}

/// Default store uses the default configuration, which always validates.
impl Default for Store {
    fn default() -> Self {
        let config = StoreConfig::default();
        let registry = DiscountRegistry::new(config.code_length, config.discount_rate());
        Store {
            config,
            registry,
            ledger: OrderLedger::new(),
        }
    }
}

// =============================================================================
// Shared Store State
// =============================================================================

/// Shared, lock-guarded store handle.
///
/// The single serialization point required by the checkout contract: two
/// concurrent checkouts can never both consume one code or observe the same
/// post-increment counter value, and readers see either the pre- or
/// post-checkout state, never an intermediate one.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Arc<Mutex<Store>>,
}

impl StoreState {
    /// Creates a shared handle around a store.
    pub fn new(store: Store) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stats = state.with_store(|store| store.stats());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.store.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let receipt = state.with_store_mut(|store| store.checkout(items, None))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new(Store::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
