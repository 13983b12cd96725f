//! Errors reported by the cart session.

use caisse_commerce::Money;
use caisse_data::GatewayError;

use crate::chrome::ToastLevel;
use crate::messages;

/// Why a session operation did not go through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("insufficient cash: {} received, {} required", received.display(), required.display())]
    InsufficientCash { required: Money, received: Money },

    #[error("a checkout is already in flight")]
    CheckoutInFlight,

    #[error("the current cart has already been finalized")]
    AlreadyFinalized,

    /// The ticket does not belong to the checkout in flight.
    #[error("unknown checkout ticket")]
    StaleTicket,

    #[error("no sale selected")]
    NoSale,

    #[error("checkout gateway: {0}")]
    Gateway(#[from] GatewayError),
}

impl SessionError {
    /// Text shown to the cashier.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => messages::EMPTY_CART.to_string(),
            Self::InsufficientCash { .. } => messages::INSUFFICIENT_CASH.to_string(),
            Self::CheckoutInFlight | Self::StaleTicket => messages::CHECKOUT_IN_FLIGHT.to_string(),
            Self::AlreadyFinalized => messages::ALREADY_FINALIZED.to_string(),
            Self::NoSale => messages::NO_SALE.to_string(),
            Self::Gateway(err) => match err {
                GatewayError::Rejected(reason) => reason
                    .clone()
                    .unwrap_or_else(|| messages::CHECKOUT_FAILED.to_string()),
                _ => messages::NETWORK_ERROR.to_string(),
            },
        }
    }

    /// Toast level matching the error.
    pub fn level(&self) -> ToastLevel {
        match self {
            Self::CheckoutInFlight | Self::StaleTicket => ToastLevel::Info,
            Self::AlreadyFinalized => ToastLevel::Warning,
            _ => ToastLevel::Danger,
        }
    }
}
