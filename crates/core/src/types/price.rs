//! Whole-unit prices and currency formatting.
//!
//! Catalog prices carry no minor units: `3499` means ₹3,499. Formatting
//! follows the digit grouping of the currency's home locale, so rupee amounts
//! use the Indian lakh/crore grouping (`1,23,456`) and the others use plain
//! thousands grouping (`123,456`).

use core::fmt;

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// A whole-unit price with currency information.
///
/// ```
/// use fa_portfolio_core::{CurrencyCode, Price};
///
/// let price = Price::new(10_497, CurrencyCode::INR);
/// assert_eq!(price.to_string(), "₹10,497");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in whole currency units.
    pub amount: u64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(0, currency_code)
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at `u64::MAX` rather than wrapping.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(u64::from(quantity)),
            self.currency_code,
        )
    }

    /// Sum of two amounts, keeping this price's currency.
    #[must_use]
    pub const fn saturating_add(self, amount: u64) -> Self {
        Self::new(self.amount.saturating_add(amount), self.currency_code)
    }

    /// The grouped amount without the currency symbol (e.g. `"10,497"`).
    #[must_use]
    pub fn grouped_amount(&self) -> String {
        self.amount.to_formatted_string(&self.currency_code.locale())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.currency_code.symbol(), self.grouped_amount())
    }
}

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyParseError(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Locale whose digit grouping is used for amounts in this currency.
    ///
    /// Every locale here uses `,` as the separator; only the grouping
    /// differs.
    #[must_use]
    pub const fn locale(self) -> Locale {
        match self {
            Self::INR => Locale::en_IN,
            Self::USD | Self::EUR | Self::GBP => Locale::en,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            _ => Err(CurrencyParseError(s.to_string())),
        }
    }
}
