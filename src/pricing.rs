//! Prices
//!
//! Catalog documents and persisted carts carry prices either as numbers or as display strings such
//! as `"$300"`. Every ingestion boundary funnels them through [`normalize_price`], so the rest of
//! the crate only ever sees a non-negative [`Decimal`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

/// Errors that can occur while normalizing a price.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The value could not be read as a decimal amount.
    #[error("invalid price: {0:?}")]
    Invalid(String),

    /// The value parsed, but is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A price as delivered by an external source, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// Numeric representation, e.g. `300` or `49.99`.
    Number(f64),

    /// Textual representation, e.g. `"$300"` or `"1,250.50"`.
    Text(String),
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Normalize a raw price into its canonical decimal form.
///
/// # Errors
///
/// - [`PriceError::Invalid`]: the value is not finite, is empty, or is not a decimal amount.
/// - [`PriceError::Negative`]: the amount is below zero.
pub fn normalize_price(raw: &RawPrice) -> Result<Decimal, PriceError> {
    let amount = match raw {
        RawPrice::Number(value) => from_number(*value)?,
        RawPrice::Text(text) => from_text(text)?,
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }

    Ok(amount)
}

fn from_number(value: f64) -> Result<Decimal, PriceError> {
    if !value.is_finite() {
        return Err(PriceError::Invalid(value.to_string()));
    }

    // `f64` displays as its shortest round-trip representation, so 49.99 stays 49.99.
    Decimal::from_str(&value.to_string()).map_err(|_err| PriceError::Invalid(value.to_string()))
}

fn from_text(text: &str) -> Result<Decimal, PriceError> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('-');
    let body = unsigned.unwrap_or(trimmed).trim_start_matches(CURRENCY_SYMBOLS).trim();

    let digits: String = body.chars().filter(|c| *c != ',').collect();

    // The only sign allowed is the leading one stripped above.
    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return Err(PriceError::Invalid(text.to_string()));
    }

    let amount =
        Decimal::from_str(&digits).map_err(|_err| PriceError::Invalid(text.to_string()))?;

    Ok(if unsigned.is_some() { -amount } else { amount })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn strips_currency_symbol() -> TestResult {
        assert_eq!(normalize_price(&"$300".into())?, Decimal::new(300, 0));
        assert_eq!(normalize_price(&"£2.99".into())?, Decimal::new(299, 2));

        Ok(())
    }

    #[test]
    fn strips_thousands_separators() -> TestResult {
        assert_eq!(normalize_price(&"1,250.50".into())?, Decimal::new(125_050, 2));

        Ok(())
    }

    #[test]
    fn accepts_numbers() -> TestResult {
        assert_eq!(normalize_price(&300.0.into())?, Decimal::new(300, 0));
        assert_eq!(normalize_price(&49.99.into())?, Decimal::new(4999, 2));

        Ok(())
    }

    #[test]
    fn accepts_surrounding_whitespace() -> TestResult {
        assert_eq!(normalize_price(&"  $ 50 ".into())?, Decimal::new(50, 0));

        Ok(())
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(
            normalize_price(&"-5".into()),
            Err(PriceError::Negative(Decimal::new(-5, 0)))
        );
        assert!(matches!(
            normalize_price(&(-1.5).into()),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(matches!(normalize_price(&"".into()), Err(PriceError::Invalid(_))));
        assert!(matches!(normalize_price(&"$".into()), Err(PriceError::Invalid(_))));
        assert!(matches!(normalize_price(&"abc".into()), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn rejects_repeated_or_misplaced_signs() {
        for text in ["--5", "-$-5", "$-5", "+5", "-+5"] {
            assert!(
                matches!(normalize_price(&text.into()), Err(PriceError::Invalid(_))),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(matches!(
            normalize_price(&f64::NAN.into()),
            Err(PriceError::Invalid(_))
        ));
    }

    #[test]
    fn raw_prices_deserialize_from_either_form() -> TestResult {
        let prices: Vec<RawPrice> = serde_norway::from_str("[300, \"$300\", 12.5]")?;

        assert_eq!(
            prices,
            vec![
                RawPrice::Number(300.0),
                RawPrice::Text("$300".to_string()),
                RawPrice::Number(12.5)
            ]
        );

        Ok(())
    }
}
