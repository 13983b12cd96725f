//! Point-of-sale domain types for the Caisse register.
//!
//! This crate provides the data the register works with:
//!
//! - **Money**: cent-exact amounts with currency-aware display
//! - **Cart**: ordered line items, one per sku, with derived totals
//! - **Checkout**: payment modes, the checkout request/response pair and
//!   the sale information the store server returns
//!
//! # Example
//!
//! ```rust
//! use caisse_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::EUR);
//! cart.add_item(Sku::new("12"), "Baguette", Money::new(120, Currency::EUR));
//! cart.add_item(Sku::new("12"), "Baguette", Money::new(120, Currency::EUR));
//!
//! let totals = cart.totals();
//! assert_eq!(totals.subtotal.display(), "2.40 \u{20ac}");
//! assert_eq!(totals.total.display(), "2.88 \u{20ac}");
//! ```

pub mod error;
pub mod ids;
pub mod input;
pub mod money;

pub mod cart;
pub mod checkout;

pub use cart::Cart;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartTotals, LineItem, TaxRate, STANDARD_TAX_RATE};

    // Checkout
    pub use crate::checkout::{
        CheckoutItem, CheckoutRequest, CheckoutResponse, PaymentMode, SaleInfo, SaleLine,
    };
}
