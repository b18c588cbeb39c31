//! # till-store: In-Memory Store Engine for Till
//!
//! Owns all mutable state: the discount-code registry, the append-only order
//! ledger, and the shared [`StoreState`] handle that funnels every mutation
//! through a single lock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     till-store (THIS CRATE)                         │
//! │                                                                     │
//! │   ┌──────────────┐      ┌──────────────┐      ┌──────────────┐      │
//! │   │ StoreConfig  │      │DiscountRegis-│      │ OrderLedger  │      │
//! │   │ interval     │      │try           │      │ orders[]     │      │
//! │   │ rate (bps)   │      │ mint/consume │      │ order_count  │      │
//! │   │ code length  │      │ validate     │      │ checkout     │      │
//! │   └──────────────┘      └──────────────┘      └──────────────┘      │
//! │                                                                     │
//! │   Store = config + registry + ledger                                │
//! │   StoreState = Arc<Mutex<Store>>  ← the single serialization point  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A checkout runs validate → consume code → append order → increment
//! counter → maybe mint, all under one lock acquisition: two concurrent
//! checkouts can never both consume the same code, and no reader ever
//! observes a half-applied checkout.

pub mod config;
pub mod ledger;
pub mod registry;
pub mod store;

pub use config::StoreConfig;
pub use ledger::OrderLedger;
pub use registry::DiscountRegistry;
pub use store::{Store, StoreState};
