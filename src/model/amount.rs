//! Amount type for handling monetary values typed into the expense form.
//!
//! This module provides the `Amount` type which keeps the text exactly as it was entered along
//! with its coerced `Decimal` value. Coercion never fails: text that is not a number is kept as
//! such and contributes zero wherever amounts are summed or compared.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Represents the amount of an expense.
///
/// The entered text is significant for equality and display, so for numeric comparisons you
/// should use `value()` or `cmp_value()`.
///
/// # Examples
///
/// Plain numbers:
/// ```
/// # use expense_tracker::model::Amount;
/// # use rust_decimal::Decimal;
/// let amount = Amount::new("12.50");
/// assert_eq!(amount.value(), Decimal::new(1250, 2));
/// assert!(amount.is_number());
/// ```
///
/// Empty text is zero:
/// ```
/// # use expense_tracker::model::Amount;
/// # use rust_decimal::Decimal;
/// let amount = Amount::new("");
/// assert_eq!(amount.value(), Decimal::ZERO);
/// assert!(amount.is_number());
/// ```
///
/// Text that is not a number contributes zero:
/// ```
/// # use expense_tracker::model::Amount;
/// # use rust_decimal::Decimal;
/// let amount = Amount::new("twelve");
/// assert!(!amount.is_number());
/// assert_eq!(amount.value(), Decimal::ZERO);
/// assert_eq!(amount.to_string(), "twelve");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    /// The text as entered.
    text: String,
    /// The coerced numerical value, `None` when the text is not a number.
    value: Option<Decimal>,
}

impl Default for Amount {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: Some(Decimal::ZERO),
        }
    }
}

impl Amount {
    /// Creates an `Amount` from entered text, coercing it to a number.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = coerce(&text);
        Self { text, value }
    }

    /// The text as it was entered.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the coerced value. Text that is not a number is zero here, so that one bad entry
    /// cannot poison a sum.
    pub fn value(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ZERO)
    }

    /// Returns the coerced value, or `None` when the text is not a number.
    pub fn number(&self) -> Option<Decimal> {
        self.value
    }

    /// Returns false when the entered text did not coerce to a number.
    pub fn is_number(&self) -> bool {
        self.value.is_some()
    }

    /// Numeric comparison using the same zero-for-not-a-number rule as sums.
    pub fn cmp_value(&self, other: &Amount) -> Ordering {
        self.value().cmp(&other.value())
    }
}

/// Coerces text the way a form's number field is read: surrounding whitespace is ignored, empty
/// text is zero, plain and scientific notation are accepted, everything else is not a number.
///
/// Only base-ten text is read: `0x10`, `0b1` and `0o7` are not numbers. `Infinity` is not a
/// number either, since a `Decimal` cannot hold it.
fn coerce(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }

    // A single leading '+' is allowed, but not in front of another sign.
    let unsigned = match trimmed.strip_prefix('+') {
        Some(rest) if rest.starts_with(['+', '-']) => return None,
        Some(rest) => rest,
        None => trimmed,
    };

    // `Decimal` tolerates digit separators that a number field does not.
    if unsigned.contains('_') {
        return None;
    }

    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .ok()
}

/// Formats a value as dollars with thousands separators, e.g. `-$60,000.00`.
pub fn format_money(value: Decimal) -> String {
    let (sign, num) = if value.is_sign_negative() && !value.is_zero() {
        ("-", value.abs())
    } else {
        ("", value)
    };
    format!(
        "{sign}${}",
        format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
    )
}

impl FromStr for Amount {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Amount::new(s))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self {
            text: value.to_string(),
            value: Some(value),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as the entered text
        serializer.serialize_str(&self.text)
    }
}

/// Form fields arrive as text, but hand-written sessions often use bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawAmount::deserialize(deserializer)? {
            RawAmount::Text(s) => Amount::new(s),
            RawAmount::Number(n) => Amount::new(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::new("50.00");
        assert_eq!(amount.value(), dec("50.00"));
        assert!(amount.is_number());
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::new("-50.25");
        assert_eq!(amount.value(), dec("-50.25"));
    }

    #[test]
    fn test_parse_leading_plus() {
        assert_eq!(Amount::new("+7").value(), dec("7"));
        assert!(!Amount::new("+-7").is_number());
    }

    #[test]
    fn test_parse_empty_string_is_zero() {
        let amount = Amount::new("");
        assert_eq!(amount.value(), Decimal::ZERO);
        assert_eq!(amount.number(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(Amount::new("  42  ").value(), dec("42"));
        assert_eq!(Amount::new("   ").number(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(Amount::new("1e3").value(), dec("1000"));
    }

    #[test]
    fn test_not_a_number_contributes_zero() {
        for text in ["abc", "$5", "1,000", "1_000", "12abc"] {
            let amount = Amount::new(text);
            assert!(!amount.is_number(), "{text} should not be a number");
            assert_eq!(amount.value(), Decimal::ZERO);
            assert_eq!(amount.text(), text);
        }
    }

    #[test]
    fn test_only_base_ten_is_read() {
        for text in ["0x10", "0b1", "0o7", "Infinity", "-Infinity"] {
            assert!(!Amount::new(text).is_number(), "{text} should not be a number");
        }
    }

    #[test]
    fn test_cmp_value() {
        let small = Amount::new("9");
        let large = Amount::new("10");
        // Text ordering would put "10" first.
        assert!(small.text() > large.text());
        assert_eq!(small.cmp_value(&large), Ordering::Less);
        assert_eq!(Amount::new("junk").cmp_value(&Amount::new("0")), Ordering::Equal);
    }

    #[test]
    fn test_display_keeps_text() {
        assert_eq!(Amount::new("10.5").to_string(), "10.5");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec("50")), "$50.00");
        assert_eq!(format_money(dec("-60000")), "-$60,000.00");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
        assert_eq!(format_money(dec("1234567.891")), "$1,234,567.89");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&Amount::new("50.00")).unwrap();
        assert_eq!(json, "\"50.00\"");
    }

    #[test]
    fn test_deserialize_text() {
        let amount: Amount = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(amount.value(), dec("12.5"));
    }

    #[test]
    fn test_deserialize_number() {
        let amount: Amount = serde_json::from_str("20").unwrap();
        assert_eq!(amount.value(), dec("20"));
        assert_eq!(amount.text(), "20");
    }
}
