//! Money amounts held as integer cents.
//!
//! Prices travel over JSON as decimal strings (`"49.99"`) and are accepted as
//! either strings or numbers. Arithmetic never goes through floating point
//! except when parsing a JSON number.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Basis points in one whole (100%).
pub const BPS_PER_UNIT: i64 = 10_000;

/// Error returned when a money string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount '{0}' is not a valid decimal")]
    Invalid(String),
    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

/// A monetary amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a rate in basis points, rounding half away from zero to
    /// the nearest cent.
    pub fn percent_bps(self, bps: u32) -> Money {
        let scaled = self.0 as i128 * bps as i128;
        let unit = BPS_PER_UNIT as i128;
        let half = unit / 2;
        let rounded = if scaled >= 0 {
            (scaled + half) / unit
        } else {
            (scaled - half) / unit
        };
        Money(rounded as i64)
    }

    /// Converts a JSON number into cents, rounding to the nearest cent.
    fn from_f64(value: f64) -> Result<Money, MoneyParseError> {
        if !value.is_finite() || value.abs() > (i64::MAX / 100) as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        Ok(Money((value * 100.0).round() as i64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let valid = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() && frac.is_empty() || !valid(whole) || !valid(frac) {
            return Err(MoneyParseError::Invalid(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(s.to_string()))?
        };
        let frac: i64 = format!("{:0<2}", frac)
            .parse()
            .map_err(|_| MoneyParseError::Invalid(s.to_string()))?;

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(|| MoneyParseError::OutOfRange(s.to_string()))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * rhs as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount as a string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                v.checked_mul(100)
                    .map(Money)
                    .ok_or_else(|| E::custom(MoneyParseError::OutOfRange(v.to_string())))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                i64::try_from(v)
                    .map_err(|_| E::custom(MoneyParseError::OutOfRange(v.to_string())))
                    .and_then(|v| self.visit_i64(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Money::from_f64(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4999).to_string(), "49.99");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(10000).to_string(), "100.00");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!("49.99".parse::<Money>().unwrap().cents(), 4999);
        assert_eq!("49.9".parse::<Money>().unwrap().cents(), 4990);
        assert_eq!("49".parse::<Money>().unwrap().cents(), 4900);
        assert_eq!("$15.00".parse::<Money>().unwrap().cents(), 1500);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("-2.25".parse::<Money>().unwrap().cents(), -225);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert!(matches!("abc".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!("1.2.3".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(".".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(
            "1.999".parse::<Money>(),
            Err(MoneyParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_percent_bps_rounds_half_up() {
        // 8% of 12.34 = 0.9872 -> 0.99
        assert_eq!(Money::from_cents(1234).percent_bps(800).cents(), 99);
        // 8% of 0.25 = 0.02 exactly
        assert_eq!(Money::from_cents(25).percent_bps(800).cents(), 2);
        // 8% of 0.31 = 0.0248 -> 0.02
        assert_eq!(Money::from_cents(31).percent_bps(800).cents(), 2);
        // 50% of 0.01 = 0.005 -> 0.01
        assert_eq!(Money::from_cents(1).percent_bps(5000).cents(), 1);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1999);
        assert_eq!((a * 3).cents(), 5997);
        assert_eq!((a + Money::from_cents(1)).cents(), 2000);
        assert_eq!((a - Money::from_cents(999)).cents(), 1000);
        let total: Money = vec![a, a].into_iter().sum();
        assert_eq!(total.cents(), 3998);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Money::from_cents(4999)).unwrap();
        assert_eq!(json, "\"49.99\"");

        let from_str: Money = serde_json::from_str("\"12.50\"").unwrap();
        let from_float: Money = serde_json::from_str("12.5").unwrap();
        let from_int: Money = serde_json::from_str("12").unwrap();
        assert_eq!(from_str.cents(), 1250);
        assert_eq!(from_float.cents(), 1250);
        assert_eq!(from_int.cents(), 1200);

        assert!(serde_json::from_str::<Money>("\"twelve\"").is_err());
    }
}
