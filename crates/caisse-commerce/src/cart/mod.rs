//! Register cart module.
//!
//! Contains the cart, its line items and the derived totals.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;

pub use cart::{clamp_quantity, parse_quantity, Cart, LineItem};
pub use pricing::{CartTotals, TaxRate, STANDARD_TAX_RATE};
