//! Checkout request and response exchanged with the store server.

use crate::cart::Cart;
use crate::checkout::PaymentMode;
use crate::ids::{SaleId, Sku};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One cart line as the checkout endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutItem {
    pub sku: Sku,
    pub name: String,
    /// Unit price as a decimal number.
    pub price: f64,
    pub qty: u32,
}

/// Body of the checkout POST.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    pub payment_mode: PaymentMode,
    /// Cash tendered; zero for non-cash modes.
    pub cash_received: f64,
}

impl CheckoutRequest {
    /// Snapshot a cart into a checkout request.
    ///
    /// Cash received is only sent for cash payments.
    pub fn from_cart(cart: &Cart, payment_mode: PaymentMode, cash_received: Money) -> Self {
        let items = cart
            .items()
            .iter()
            .map(|item| CheckoutItem {
                sku: item.sku.clone(),
                name: item.name.clone(),
                price: item.unit_price.to_decimal(),
                qty: item.quantity,
            })
            .collect();

        let cash_received = if payment_mode.is_cash() {
            cash_received.to_decimal()
        } else {
            0.0
        };

        Self {
            items,
            payment_mode,
            cash_received,
        }
    }

    /// Total number of units in the request.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }
}

/// Reply of the checkout endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<SaleId>,
    /// Page to navigate to after a successful sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Server explanation of a refusal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Confirmation text for a recorded sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Toast level for the confirmation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast_type: Option<String>,
}
