//! Payment modes accepted at the register.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How the customer pays.
///
/// Only cash has register-side rules (cash tendered must cover the total);
/// every other mode is passed to the store server as its code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PaymentMode {
    /// Cash; the cashier enters the amount received.
    #[default]
    Cash,
    /// Bank card.
    Card,
    /// Any other mode known to the store server.
    Other(String),
}

impl PaymentMode {
    /// Wire code of this mode.
    pub fn code(&self) -> &str {
        match self {
            PaymentMode::Cash => "CASH",
            PaymentMode::Card => "CARD",
            PaymentMode::Other(code) => code,
        }
    }

    /// Parse a mode code as sent by a payment radio button.
    pub fn from_code(code: &str) -> Self {
        let trimmed = code.trim();
        match trimmed.to_uppercase().as_str() {
            "CASH" => PaymentMode::Cash,
            "CARD" => PaymentMode::Card,
            _ => PaymentMode::Other(trimmed.to_string()),
        }
    }

    /// Check if this is cash.
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMode::Cash)
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for PaymentMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for PaymentMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(PaymentMode::from_code(&code))
    }
}
