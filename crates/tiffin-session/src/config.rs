//! # Store Configuration
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TIFFIN_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use serde::{Deserialize, Serialize};
use tiffin_core::Money;

/// Storefront configuration.
///
/// ## Fields
/// All fields have sensible defaults for development.
/// Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (displayed in the header and on order confirmations)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for StoreConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Tiffin Dev Store"
    /// - Currency: USD ($)
    fn default() -> Self {
        StoreConfig {
            store_name: "Tiffin Dev Store".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl StoreConfig {
    /// Creates a new StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TIFFIN_STORE_NAME`: Override store name
    /// - `TIFFIN_CURRENCY_CODE`: Override currency code
    /// - `TIFFIN_CURRENCY_SYMBOL`: Override currency symbol
    /// - `TIFFIN_CURRENCY_DECIMALS`: Override decimal places (e.g., "0" for JPY)
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(store_name) = std::env::var("TIFFIN_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(currency_code) = std::env::var("TIFFIN_CURRENCY_CODE") {
            config.currency_code = currency_code;
        }

        if let Ok(currency_symbol) = std::env::var("TIFFIN_CURRENCY_SYMBOL") {
            config.currency_symbol = currency_symbol;
        }

        if let Ok(decimals_str) = std::env::var("TIFFIN_CURRENCY_DECIMALS") {
            if let Ok(decimals) = decimals_str.parse::<u8>() {
                config.currency_decimals = decimals;
            }
        }

        config
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_zero_decimals() {
        let config = StoreConfig {
            currency_symbol: "¥".to_string(),
            currency_decimals: 0,
            ..StoreConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(1234)), "¥1234");
    }

    #[test]
    fn test_format_currency_large() {
        let config = StoreConfig::default();
        assert_eq!(
            config.format_currency(Money::from_cents(123456789)),
            "$1234567.89"
        );
    }
}
