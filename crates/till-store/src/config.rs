//! # Store Configuration
//!
//! The three tunables of the discount engine. Values are fixed once the
//! store is constructed; there is no runtime mutation path.
//!
//! ## Configuration Sources
//! ```text
//! 1. Environment Variables (highest priority)
//!    TILL_DISCOUNT_INTERVAL=3
//!    TILL_DISCOUNT_RATE_BPS=1000
//!    TILL_CODE_LENGTH=8
//!
//! 2. Default Values (lowest priority)
//!    interval 3, rate 1000 bps (10%), code length 8
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use till_core::error::ValidationError;
use till_core::types::DiscountRate;
use till_core::{DEFAULT_CODE_LENGTH, DEFAULT_DISCOUNT_INTERVAL, DEFAULT_DISCOUNT_RATE_BPS};

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for the store engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Every Nth completed order mints a reward code.
    #[serde(default = "default_discount_interval")]
    pub discount_interval: u64,

    /// Promotional discount rate in basis points (1000 = 10%).
    #[serde(default = "default_discount_rate_bps")]
    pub discount_rate_bps: u32,

    /// Length of generated discount codes, in characters.
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

fn default_discount_interval() -> u64 {
    DEFAULT_DISCOUNT_INTERVAL
}

fn default_discount_rate_bps() -> u32 {
    DEFAULT_DISCOUNT_RATE_BPS
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            discount_interval: default_discount_interval(),
            discount_rate_bps: default_discount_rate_bps(),
            code_length: default_code_length(),
        }
    }
}

impl StoreConfig {
    /// Builds a config from defaults plus `TILL_*` environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - `discount_interval` must be at least 1
    /// - `discount_rate_bps` must not exceed 10000 (100%)
    /// - `code_length` must be at least 1
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.discount_interval == 0 {
            return Err(ValidationError::MustBePositive {
                field: "discount_interval".to_string(),
            });
        }

        if self.discount_rate_bps > 10000 {
            return Err(ValidationError::OutOfRange {
                field: "discount_rate_bps".to_string(),
                min: 0,
                max: 10000,
            });
        }

        if self.code_length == 0 {
            return Err(ValidationError::MustBePositive {
                field: "code_length".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the discount rate as a typed value.
    #[inline]
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_rate_bps)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(interval) = std::env::var("TILL_DISCOUNT_INTERVAL") {
            if let Ok(n) = interval.parse::<u64>() {
                debug!(interval = n, "Overriding discount interval from environment");
                self.discount_interval = n;
            }
        }

        if let Ok(rate) = std::env::var("TILL_DISCOUNT_RATE_BPS") {
            if let Ok(bps) = rate.parse::<u32>() {
                debug!(bps, "Overriding discount rate from environment");
                self.discount_rate_bps = bps;
            }
        }

        if let Ok(len) = std::env::var("TILL_CODE_LENGTH") {
            if let Ok(n) = len.parse::<usize>() {
                debug!(length = n, "Overriding code length from environment");
                self.code_length = n;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
