//! Money type for representing monetary values.
//!
//! Amounts are integer cents; cart totals stay exact to the cent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::input::leading_decimal;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF",
        }
    }

    /// Whether the symbol is written after the amount ("12.00 €").
    pub fn symbol_after(&self) -> bool {
        matches!(self, Currency::EUR | Currency::CHF)
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounded to the cent.
    ///
    /// ```
    /// use caisse_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::EUR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Read an amount typed by a cashier or carried in a page attribute.
    ///
    /// Non-numeric text and negative values read as zero.
    pub fn parse_lenient(input: &str, currency: Currency) -> Self {
        match leading_decimal(input) {
            Some(value) if value > 0.0 => Self::from_decimal(value, currency),
            _ => Self::zero(currency),
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "49.99 €" or "$49.99").
    pub fn display(&self) -> String {
        if self.currency.symbol_after() {
            format!("{} {}", self.display_amount(), self.currency.symbol())
        } else {
            format!("{}{}", self.currency.symbol(), self.display_amount())
        }
    }

    /// Format as a display string without symbol (e.g., "49.99").
    ///
    /// Formatting goes through the integer cents so no float rounding
    /// can creep into the printed value.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!(
            "{sign}{}.{:0width$}",
            abs / divisor as u64,
            abs % divisor as u64,
            width = places as usize
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
