//! Payment mode selection and the cash fields.

use caisse_commerce::checkout::PaymentMode;
use caisse_commerce::{Currency, Money};

/// Selected payment mode plus the cash amount typed by the cashier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentToggle {
    mode: PaymentMode,
    cash_text: String,
}

impl PaymentToggle {
    pub fn new(mode: PaymentMode) -> Self {
        Self {
            mode,
            cash_text: String::new(),
        }
    }

    pub fn mode(&self) -> &PaymentMode {
        &self.mode
    }

    /// Switch mode. Leaving cash clears the entered amount.
    pub fn select(&mut self, mode: PaymentMode) {
        if !mode.is_cash() {
            self.cash_text.clear();
        }
        self.mode = mode;
    }

    /// Whether the cash input group is shown.
    pub fn cash_fields_visible(&self) -> bool {
        self.mode.is_cash()
    }

    /// Store the cash input as typed.
    pub fn set_cash_text(&mut self, text: impl Into<String>) {
        self.cash_text = text.into();
    }

    pub fn cash_text(&self) -> &str {
        &self.cash_text
    }

    /// Cash received. Unreadable input and non-cash modes count as zero.
    pub fn cash_received(&self, currency: Currency) -> Money {
        if self.mode.is_cash() {
            Money::parse_lenient(&self.cash_text, currency)
        } else {
            Money::zero(currency)
        }
    }
}
