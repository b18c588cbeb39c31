//! # Discount Registry
//!
//! Owns every [`DiscountCode`] ever issued and enforces single-use
//! semantics.
//!
//! ## Code Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Discount Code Lifecycle                        │
//! │                                                                     │
//! │  mint() ──► { code, is_used: false, generated_at }                  │
//! │     │          │                                                    │
//! │     │          ├── validate(code, total) ──► quote (read-only)      │
//! │     │          │                                                    │
//! │     │          └── consume(code) ──► { is_used: true }  (once!)     │
//! │     │                                   │                           │
//! │     │                                   └── consume/validate again  │
//! │     │                                        ──► CodeAlreadyUsed    │
//! │     └── reset() is the only way a code ever disappears              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uniqueness is a contract, not a probability: `mint` retries against the
//! issued set and fails with [`CoreError::CodeSpaceExhausted`] rather than
//! trusting the birthday bound.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use till_core::error::{CoreError, CoreResult};
use till_core::money::Money;
use till_core::types::{DiscountCode, DiscountQuote, DiscountRate};
use till_core::CODE_ALPHABET;

/// Attempts at generating a fresh code before giving up.
///
/// At the default 36^8 code space this bound is never reached in practice;
/// it exists so a misconfigured one-character code space fails loudly
/// instead of spinning.
const MAX_MINT_ATTEMPTS: u32 = 64;

// =============================================================================
// Discount Registry
// =============================================================================

/// Registry of all issued discount codes, in issuance order.
#[derive(Debug, Clone)]
pub struct DiscountRegistry {
    /// Codes in issuance order (admin listing preserves this).
    codes: Vec<DiscountCode>,

    /// code → slot in `codes`.
    index: HashMap<String, usize>,

    /// Length of generated codes.
    code_length: usize,

    /// Discount rate applied when quoting a cart total.
    rate: DiscountRate,
}

impl DiscountRegistry {
    /// Creates an empty registry.
    pub fn new(code_length: usize, rate: DiscountRate) -> Self {
        DiscountRegistry {
            codes: Vec::new(),
            index: HashMap::new(),
            code_length,
            rate,
        }
    }

    /// Mints a new unique, unused code stamped with the current time.
    ///
    /// Retries generation on collision with an already-issued code. After
    /// [`MAX_MINT_ATTEMPTS`] consecutive collisions the code space is
    /// treated as exhausted, a fatal configuration error.
    pub fn mint(&mut self) -> CoreResult<DiscountCode> {
        let mut rng = rand::rng();

        for _ in 0..MAX_MINT_ATTEMPTS {
            let candidate: String = (0..self.code_length)
                .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
                .collect();

            if self.index.contains_key(&candidate) {
                debug!(code = %candidate, "Generated code collided, retrying");
                continue;
            }

            let code = DiscountCode::new(candidate, Utc::now());
            self.index.insert(code.code.clone(), self.codes.len());
            self.codes.push(code.clone());
            return Ok(code);
        }

        Err(CoreError::CodeSpaceExhausted {
            attempts: MAX_MINT_ATTEMPTS,
        })
    }

    /// Quotes the discount for `code` against `cart_total`.
    ///
    /// Read-only: quoting any number of times leaves the code unused.
    /// Distinguishes a code that was never issued from one already spent.
    pub fn validate(&self, code: &str, cart_total: Money) -> CoreResult<DiscountQuote> {
        let record = self.lookup(code)?;

        Ok(DiscountQuote {
            code: record.code.clone(),
            discount_cents: cart_total.calculate_discount(self.rate).cents(),
        })
    }

    /// Atomically checks and marks `code` as used.
    ///
    /// On failure (not found / already used) nothing is mutated. Agrees
    /// with [`validate`](Self::validate) on the outcome for any code, but
    /// only this operation has side effects.
    pub fn consume(&mut self, code: &str) -> CoreResult<()> {
        let slot = match self.index.get(code) {
            Some(&slot) => slot,
            None => return Err(CoreError::CodeNotFound(code.to_string())),
        };

        let record = &mut self.codes[slot];
        if record.is_used {
            return Err(CoreError::CodeAlreadyUsed(code.to_string()));
        }

        record.is_used = true;
        Ok(())
    }

    /// All codes ever issued (used and unused), in issuance order.
    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }

    /// The code strings alone, in issuance order (admin/stats listing).
    pub fn code_values(&self) -> Vec<String> {
        self.codes.iter().map(|c| c.code.clone()).collect()
    }

    /// The configured discount rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        self.rate
    }

    /// Number of codes ever issued.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no codes have been issued.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Clears all codes. Full store reset only.
    pub fn reset(&mut self) {
        self.codes.clear();
        self.index.clear();
    }

    fn lookup(&self, code: &str) -> CoreResult<&DiscountCode> {
        let record = match self.index.get(code) {
            Some(&slot) => &self.codes[slot],
            None => return Err(CoreError::CodeNotFound(code.to_string())),
        };

        if record.is_used {
            return Err(CoreError::CodeAlreadyUsed(code.to_string()));
        }

        Ok(record)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
