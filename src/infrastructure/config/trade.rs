//! Trade sizing configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Market-maker settings from the `[trade]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeAppConfig {
    /// LMSR liquidity parameter `b`.
    pub liquidity: f64,
    /// Legs smaller than this are dropped from a trade plan.
    pub min_shares: Decimal,
}

impl Default for TradeAppConfig {
    fn default() -> Self {
        Self {
            liquidity: 100.0,
            min_shares: Decimal::new(1, 2),
        }
    }
}

impl TradeAppConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.liquidity.is_finite() && self.liquidity > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "liquidity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.min_shares < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_shares",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
