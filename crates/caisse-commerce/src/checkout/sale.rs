//! Sale information returned by the store server once a sale is recorded.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Format of the `date` field of a sale.
pub const SALE_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Invoice data of a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleInfo {
    pub invoice_number: String,
    /// Sale date as formatted by the server (`dd/mm/YYYY HH:MM`).
    pub date: String,
    /// Full name of the cashier who recorded the sale.
    pub cashier: String,
    pub customer: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_amount: Money,
    pub items: Vec<SaleLine>,
}

impl SaleInfo {
    /// Parse the sale date.
    pub fn parsed_date(&self) -> Result<NaiveDateTime, CommerceError> {
        NaiveDateTime::parse_from_str(&self.date, SALE_DATE_FORMAT)
            .map_err(|_| CommerceError::InvalidDate(self.date.clone()))
    }
}

/// One product line of a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    /// Product name.
    pub product: String,
    pub quantity: u32,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub unit_price: Option<Money>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub line_total: Money,
}

impl SaleLine {
    /// Unit price, derived from the line total when the server omits it.
    pub fn unit_price(&self) -> Money {
        if let Some(price) = self.unit_price {
            return price;
        }
        if self.quantity == 0 {
            return self.line_total;
        }
        Money::from_decimal(
            self.line_total.to_decimal() / f64::from(self.quantity),
            self.line_total.currency,
        )
    }
}

/// Parse a decimal amount such as `"12.50"` strictly.
pub fn parse_amount(text: &str, currency: Currency) -> Result<Money, CommerceError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| Money::from_decimal(v, currency))
        .ok_or_else(|| CommerceError::InvalidAmount(text.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn into_money<E: de::Error>(self) -> Result<Money, E> {
        match self {
            RawAmount::Number(v) => Ok(Money::from_decimal(v, Currency::EUR)),
            RawAmount::Text(s) => parse_amount(&s, Currency::EUR).map_err(E::custom),
        }
    }
}

/// Amounts arrive either as JSON numbers or as decimal strings.
fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    RawAmount::deserialize(deserializer)?.into_money()
}

fn deserialize_optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Money>, D::Error> {
    Option::<RawAmount>::deserialize(deserializer)?
        .map(RawAmount::into_money)
        .transpose()
}
