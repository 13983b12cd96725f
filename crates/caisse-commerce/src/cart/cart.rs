//! Cart and line item types.

use crate::cart::{CartTotals, TaxRate};
use crate::ids::Sku;
use crate::input::leading_int;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Clamp a requested quantity to at least 1.
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(1, i64::from(u32::MAX)) as u32
}

/// Read a quantity typed into a quantity field.
///
/// Non-numeric and non-positive input reads as 1.
pub fn parse_quantity(input: &str) -> u32 {
    leading_int(input).map(clamp_quantity).unwrap_or(1)
}

/// The register cart of the sale in progress.
///
/// Line items keep insertion order, and that order is the one the register
/// displays: every index-based operation addresses the same position the
/// cashier sees on screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: Currency,
    tax_rate: TaxRate,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self::with_tax_rate(currency, TaxRate::default())
    }

    /// Create an empty cart with an explicit tax rate.
    pub fn with_tax_rate(currency: Currency, tax_rate: TaxRate) -> Self {
        Self {
            items: Vec::new(),
            currency,
            tax_rate,
        }
    }

    /// Add one unit of a product.
    ///
    /// If the sku is already in the cart its quantity goes up by one,
    /// otherwise a new line is appended. Returns the line index.
    pub fn add_item(&mut self, sku: Sku, name: impl Into<String>, unit_price: Money) -> usize {
        if let Some(index) = self.items.iter().position(|i| i.sku == sku) {
            let item = &mut self.items[index];
            item.quantity = item.quantity.saturating_add(1);
            return index;
        }

        let unit_price = if unit_price.is_negative() {
            Money::zero(self.currency)
        } else {
            Money::new(unit_price.amount_cents, self.currency)
        };

        self.items.push(LineItem {
            sku,
            name: name.into(),
            unit_price,
            quantity: 1,
        });
        self.items.len() - 1
    }

    /// Set the quantity of the line at `index`, clamped to at least 1.
    ///
    /// Returns true if the quantity changed.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let quantity = clamp_quantity(quantity);
        match self.items.get_mut(index) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Add one unit to the line at `index`.
    ///
    /// Returns true if the quantity changed.
    pub fn increment(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) if item.quantity < u32::MAX => {
                item.quantity += 1;
                true
            }
            _ => false,
        }
    }

    /// Take one unit off the line at `index`.
    ///
    /// A line at quantity 1 stays at 1; use [`Cart::remove_item`] to drop it.
    /// Returns true if the quantity changed.
    pub fn decrement(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Remove the line at `index`.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the line at `index`.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Get a line by sku.
    pub fn get_by_sku(&self, sku: &Sku) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.sku == sku)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Tax rate applied to the subtotal.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Subtotal, tax and total of the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.items, self.currency, self.tax_rate)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product identifier.
    pub sku: Sku,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price, never negative.
    pub unit_price: Money,
    /// Quantity, at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        Money::new(
            self.unit_price
                .amount_cents
                .saturating_mul(i64::from(self.quantity)),
            self.unit_price.currency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur(cents: i64) -> Money {
        Money::new(cents, Currency::EUR)
    }

    #[test]
    fn test_add_same_sku_increments_quantity() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "Café", eur(250));
        cart.add_item(Sku::new("1"), "Café", eur(250));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("b"), "B", eur(100));
        cart.add_item(Sku::new("a"), "A", eur(100));
        cart.add_item(Sku::new("b"), "B", eur(100));

        let skus: Vec<&str> = cart.items().iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["b", "a"]);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(1000));
        cart.add_item(Sku::new("1"), "A", eur(1000));
        cart.add_item(Sku::new("2"), "B", eur(500));

        let totals = cart.totals();
        assert_eq!(totals.subtotal.amount_cents, 2500);
        assert_eq!(totals.tax.amount_cents, 500);
        assert_eq!(totals.total.amount_cents, 3000);
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(100));

        assert!(!cart.decrement(0));
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(100));

        assert!(cart.set_quantity(0, 7));
        assert_eq!(cart.items()[0].quantity, 7);
        assert!(cart.set_quantity(0, -5));
        assert_eq!(cart.items()[0].quantity, 1);
        assert!(!cart.set_quantity(0, 0));
        assert_eq!(cart.items()[0].quantity, 1);
        assert!(!cart.set_quantity(3, 7));
    }

    #[test]
    fn test_set_same_quantity_is_not_a_change() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(100));
        cart.set_quantity(0, 3);

        assert!(!cart.set_quantity(0, 3));
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_large_quantities_are_kept() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(100));

        assert!(cart.set_quantity(0, 12_000));
        assert_eq!(cart.items()[0].quantity, 12_000);
        cart.add_item(Sku::new("1"), "A", eur(100));
        assert_eq!(cart.items()[0].quantity, 12_001);
        assert!(cart.increment(0));
        assert_eq!(cart.items()[0].quantity, 12_002);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("4"), 4);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("-2"), 1);
        assert_eq!(parse_quantity("deux"), 1);
        assert_eq!(parse_quantity("12000"), 12_000);
    }

    #[test]
    fn test_remove_only_item_resets_totals() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(100));

        let removed = cart.remove_item(0).unwrap();
        assert_eq!(removed.sku, Sku::new("1"));
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::zero(Currency::EUR));
        assert!(cart.remove_item(0).is_none());
    }

    #[test]
    fn test_negative_price_is_zeroed() {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("1"), "A", eur(-100));
        assert!(cart.items()[0].unit_price.is_zero());
    }
}
