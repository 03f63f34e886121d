//! Product price representation.
//!
//! The backend serves prices in two shapes: a raw decimal amount and a
//! pre-formatted display string (e.g. `"5 000 ₽"`). Older catalog entries
//! only carry the display string, so numeric resolution falls back to
//! extracting the digits from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price as served by the catalog.
///
/// Accepts three wire encodings: the full object, a bare number (raw
/// amount only) and a bare string (display only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "PriceRepr")]
pub struct Price {
    /// Raw numeric amount in the shop currency's major unit.
    ///
    /// Preferred source for arithmetic; absent on legacy catalog entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Decimal>,
    /// Pre-formatted display string (currency symbol, digit grouping).
    pub display: String,
}

impl Price {
    /// Create a price from a raw amount, deriving a plain display string.
    #[must_use]
    pub fn from_raw(raw: Decimal) -> Self {
        Self {
            raw: Some(raw),
            display: raw.to_string(),
        }
    }

    /// Create a price from a display string only (legacy catalog entries).
    #[must_use]
    pub fn from_display(display: impl Into<String>) -> Self {
        Self {
            raw: None,
            display: display.into(),
        }
    }

    /// Resolve the numeric amount.
    ///
    /// Prefers the raw amount; otherwise parses the digit runs out of the
    /// display string. A display string with no digits resolves to zero -
    /// price resolution is total and never fails.
    #[must_use]
    pub fn numeric(&self) -> Decimal {
        if let Some(raw) = self.raw {
            return raw;
        }

        let digits: String = self.display.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Decimal::ZERO;
        }

        digits.parse().unwrap_or(Decimal::ZERO)
    }
}

/// Wire representations accepted for a price.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Full {
        #[serde(default)]
        raw: Option<Decimal>,
        display: String,
    },
    Amount(Decimal),
    Display(String),
}

impl From<PriceRepr> for Price {
    fn from(repr: PriceRepr) -> Self {
        match repr {
            PriceRepr::Full { raw, display } => Self { raw, display },
            PriceRepr::Amount(amount) => Self::from_raw(amount),
            PriceRepr::Display(display) => match display.parse::<Decimal>() {
                Ok(raw) => Self {
                    raw: Some(raw),
                    display,
                },
                Err(_) => Self::from_display(display),
            },
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_prefers_raw() {
        let price = Price {
            raw: Some(Decimal::from(50_000)),
            display: "999 ₽".to_string(),
        };
        assert_eq!(price.numeric(), Decimal::from(50_000));
    }

    #[test]
    fn test_numeric_parses_display_digits() {
        let price = Price::from_display("5 000 ₽");
        assert_eq!(price.numeric(), Decimal::from(5_000));
    }

    #[test]
    fn test_numeric_no_digits_is_zero() {
        let price = Price::from_display("договорная");
        assert_eq!(price.numeric(), Decimal::ZERO);
    }

    #[test]
    fn test_numeric_empty_display_is_zero() {
        let price = Price::from_display("");
        assert_eq!(price.numeric(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_full_object() {
        let price: Price = serde_json::from_str(r#"{ "raw": "5000", "display": "5 000 ₽" }"#).unwrap();
        assert_eq!(price.numeric(), Decimal::from(5_000));
        assert_eq!(price.display, "5 000 ₽");
    }

    #[test]
    fn test_deserialize_bare_number() {
        let price: Price = serde_json::from_str("250").unwrap();
        assert_eq!(price.raw, Some(Decimal::from(250)));
        assert_eq!(price.display, "250");
    }

    #[test]
    fn test_deserialize_fractional_number() {
        let price: Price = serde_json::from_str("499.5").unwrap();
        assert_eq!(price.raw, Some(Decimal::new(4_995, 1)));
        assert_eq!(price.display, "499.5");
    }

    #[test]
    fn test_deserialize_bare_string() {
        let price: Price = serde_json::from_str(r#""1 200 ₽""#).unwrap();
        assert!(price.raw.is_none());
        assert_eq!(price.numeric(), Decimal::from(1_200));
    }

    #[test]
    fn test_deserialize_numeric_string_keeps_raw() {
        let price: Price = serde_json::from_str(r#""4500""#).unwrap();
        assert_eq!(price.raw, Some(Decimal::from(4_500)));
    }

    #[test]
    fn test_from_raw_display() {
        let price = Price::from_raw(Decimal::from(1_500));
        assert_eq!(price.display, "1500");
        assert_eq!(price.numeric(), Decimal::from(1_500));
    }
}
