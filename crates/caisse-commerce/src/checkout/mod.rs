//! Checkout module.
//!
//! Contains payment modes, the checkout wire types and recorded sale data.

mod payment;
mod request;
mod sale;

pub use payment::PaymentMode;
pub use request::{CheckoutItem, CheckoutRequest, CheckoutResponse};
pub use sale::{parse_amount, SaleInfo, SaleLine, SALE_DATE_FORMAT};
