//! Commerce error types.

use thiserror::Error;

/// Errors raised while reading or converting commerce data.
///
/// Cart mutations themselves never fail: register input is coerced rather
/// than rejected. These errors come from strict parsing of data sent back by
/// the store server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Amount text that is not a decimal number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Sale date that does not match the server format.
    #[error("Invalid sale date: {0}")]
    InvalidDate(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
