//! Cart totals.

use crate::cart::LineItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A tax rate expressed in basis points (1% = 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate(u32);

/// Rate applied to every register sale.
pub const STANDARD_TAX_RATE: TaxRate = TaxRate::from_percent(20);

impl TaxRate {
    /// Create a rate from a whole percentage.
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent * 100)
    }

    /// Create a rate from basis points.
    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// Rate in basis points.
    pub fn basis_points(&self) -> u32 {
        self.0
    }

    /// Tax due on an amount, rounded half-up to the cent.
    pub fn apply(&self, amount: Money) -> Money {
        let scaled = i128::from(amount.amount_cents) * i128::from(self.0);
        let half = if scaled >= 0 { 5_000 } else { -5_000 };
        let cents = (scaled + half) / 10_000;
        Money::new(
            cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64,
            amount.currency,
        )
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        STANDARD_TAX_RATE
    }
}

/// Derived totals of a cart.
///
/// Always recomputed from the line items; never stored alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

impl CartTotals {
    /// Compute totals for a list of line items.
    pub fn compute(items: &[LineItem], currency: Currency, rate: TaxRate) -> Self {
        let subtotal_cents = items
            .iter()
            .map(|item| item.line_total().amount_cents)
            .fold(0_i64, i64::saturating_add);
        let subtotal = Money::new(subtotal_cents, currency);
        let tax = rate.apply(subtotal);
        let total = Money::new(subtotal_cents.saturating_add(tax.amount_cents), currency);

        Self {
            subtotal,
            tax,
            total,
        }
    }

    /// Totals of an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }
}
