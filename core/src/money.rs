//! Exact-decimal monetary values.
//!
//! Amounts are arbitrary-precision decimals so that balances survive the
//! SQL round trip without floating-point drift. Only the amount crosses
//! the column boundary; the decode side reconstitutes the default
//! currency.

use std::fmt;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::row::{ColumnDecode, ColumnEncode, ColumnValue};

/// ISO currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

/// An amount of money in a single currency.
///
/// # Examples
///
/// ```
/// use rowfold_core::{Currency, Money};
///
/// let ten = Money::of(Currency::Usd, 10);
/// assert_eq!(ten.to_string(), "USD 10");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    currency: Currency,
    amount: BigDecimal,
}

impl Money {
    /// Creates an amount from whole currency units.
    pub fn of(currency: Currency, major_units: i64) -> Self {
        Self {
            currency,
            amount: BigDecimal::from(major_units),
        }
    }

    /// Creates an amount from an exact decimal.
    pub fn with_amount(currency: Currency, amount: BigDecimal) -> Self {
        Self { currency, amount }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency.code(), self.amount)
    }
}

impl ColumnDecode for Money {
    const EXPECTED: &'static str = "decimal amount";

    // Currency is not persisted; stored amounts are read back as USD,
    // matching the writer below.
    fn decode(value: &ColumnValue) -> Option<Self> {
        let amount = match value {
            ColumnValue::Text(s) => s.parse::<BigDecimal>().ok()?,
            ColumnValue::Integer(i) => BigDecimal::from(*i),
            ColumnValue::Real(f) => BigDecimal::try_from(*f).ok()?,
            _ => return None,
        };
        Some(Money::with_amount(Currency::Usd, amount))
    }
}

impl ColumnEncode for Money {
    fn encode(&self) -> ColumnValue {
        ColumnValue::Text(self.amount.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::of(Currency::Usd, 5).to_string(), "USD 5");
        assert_eq!(Money::of(Currency::Eur, 7).to_string(), "EUR 7");
    }

    #[test]
    fn test_money_column_round_trip() {
        let ten = Money::of(Currency::Usd, 10);
        let encoded = ten.encode();
        assert_eq!(encoded, ColumnValue::Text("10".to_string()));

        let decoded = Money::decode(&encoded).unwrap();
        assert_eq!(decoded, ten);
    }

    #[test]
    fn test_money_decodes_integer_columns() {
        let decoded = Money::decode(&ColumnValue::Integer(5)).unwrap();
        assert_eq!(decoded, Money::of(Currency::Usd, 5));
    }

    #[test]
    fn test_money_rejects_blob() {
        assert!(Money::decode(&ColumnValue::Blob(vec![1, 2])).is_none());
    }

    #[test]
    fn test_fractional_amounts_are_exact() {
        let decoded = Money::decode(&ColumnValue::Text("19.99".to_string())).unwrap();
        assert_eq!(decoded.amount(), &"19.99".parse::<BigDecimal>().unwrap());
    }
}
