//! Currency converter over the current price list
//!
//! Converts between tracked assets, or between an asset and the reference
//! currency the list is denominated in.

use crate::feed::PriceRecord;
use rust_decimal::Decimal;
use thiserror::Error;

/// Conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// Neither a tracked asset nor the reference currency
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),
    /// Asset is tracked but has no current price
    #[error("No price available for {0}")]
    MissingPrice(String),
    /// Target price is zero, conversion is undefined
    #[error("Price of {0} is zero")]
    ZeroPrice(String),
    #[error("Amount must not be negative")]
    NegativeAmount,
    /// Result does not fit in a decimal
    #[error("Conversion of {amount} {from} overflows")]
    Overflow { from: String, amount: Decimal },
}

/// Converts amounts using prices denominated in one reference currency
pub struct Converter<'a> {
    records: &'a [PriceRecord],
    currency: &'a str,
}

impl<'a> Converter<'a> {
    /// Create a converter over `records` priced in `currency`
    pub fn new(records: &'a [PriceRecord], currency: &'a str) -> Self {
        Self { records, currency }
    }

    /// Convert `amount` of `from` into `to`
    ///
    /// Assets match by id or symbol, case-insensitively.
    pub fn convert(&self, from: &str, to: &str, amount: Decimal) -> Result<Decimal, ConvertError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ConvertError::NegativeAmount);
        }

        let from_price = self.unit_price(from)?;
        let to_price = self.unit_price(to)?;
        if to_price.is_zero() {
            return Err(ConvertError::ZeroPrice(to.to_string()));
        }

        amount
            .checked_mul(from_price)
            .and_then(|value| value.checked_div(to_price))
            .ok_or_else(|| ConvertError::Overflow {
                from: from.to_string(),
                amount,
            })
    }

    /// Price of one unit of `asset` in the reference currency
    fn unit_price(&self, asset: &str) -> Result<Decimal, ConvertError> {
        if asset.eq_ignore_ascii_case(self.currency) {
            return Ok(Decimal::ONE);
        }

        let record = self
            .records
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(asset))
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| r.symbol.eq_ignore_ascii_case(asset))
            })
            .ok_or_else(|| ConvertError::UnknownAsset(asset.to_string()))?;

        record
            .current_price
            .ok_or_else(|| ConvertError::MissingPrice(record.id.clone()))
    }
}
