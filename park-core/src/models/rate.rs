use std::fmt;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Hourly parking price.
///
/// A rate is never negative. It usually comes from page or file
/// configuration, so parsing is lenient: missing or unparseable input
/// becomes a zero rate instead of an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// Creates a rate, clamping negative values to zero.
    pub fn new(per_hour: Decimal) -> Self {
        if per_hour.is_sign_negative() && !per_hour.is_zero() {
            tracing::warn!(rate = %per_hour, "negative hourly rate clamped to zero");
            return Self::ZERO;
        }
        Self(per_hour)
    }

    /// Parses a rate from a raw configuration value.
    ///
    /// Thousands separators and surrounding whitespace are ignored and the
    /// leading numeric part is used (`"20 / hr"` is `20`). `None`, empty or
    /// non-numeric input yields [`Rate::ZERO`].
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::ZERO;
        };
        let normalized = raw.trim().replace(',', "");
        let prefix = numeric_prefix(&normalized);
        if prefix.is_empty() {
            if !normalized.is_empty() {
                tracing::warn!(input = %raw, "unparseable hourly rate, using zero");
            }
            return Self::ZERO;
        }
        match prefix.parse::<Decimal>() {
            Ok(value) => Self::new(value),
            Err(e) => {
                tracing::warn!(input = %raw, "unparseable hourly rate, using zero: {}", e);
                Self::ZERO
            }
        }
    }

    pub fn per_hour(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Rate {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Rate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits]`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if has_digits { &s[..end] } else { "" }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.0, serializer)
    }
}

struct RateVisitor;

impl<'de> Visitor<'de> for RateVisitor {
    type Value = Rate;

    fn expecting(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("an hourly rate as a number or string")
    }

    fn visit_i64<E: de::Error>(
        self,
        v: i64,
    ) -> Result<Rate, E> {
        Ok(Rate::new(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(
        self,
        v: u64,
    ) -> Result<Rate, E> {
        Ok(Rate::new(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(
        self,
        v: f64,
    ) -> Result<Rate, E> {
        Ok(Rate::parse(Some(&v.to_string())))
    }

    fn visit_str<E: de::Error>(
        self,
        v: &str,
    ) -> Result<Rate, E> {
        Ok(Rate::parse(Some(v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Rate, E> {
        Ok(Rate::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Rate, E> {
        Ok(Rate::ZERO)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RateVisitor)
    }
}
