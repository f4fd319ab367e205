// Typed sensor reading values and their canonical text form

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::ValidationError;

/// Value carried by a log entry. The variant is fixed by the sensor type that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadingValue {
    Integer(i64),
    Decimal(f64),
    /// Sun events: the computed instant in UTC.
    Instant(DateTime<Utc>),
}

/// Storage tag for each variant.
pub const KIND_INTEGER: &str = "integer";
pub const KIND_DECIMAL: &str = "decimal";
pub const KIND_INSTANT: &str = "instant";

impl ReadingValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ReadingValue::Integer(_) => KIND_INTEGER,
            ReadingValue::Decimal(_) => KIND_DECIMAL,
            ReadingValue::Instant(_) => KIND_INSTANT,
        }
    }

    /// Rebuilds a value from its storage tag and text form.
    pub fn from_parts(kind: &str, raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::rule(format!("Invalid {} reading: {}", kind, raw));
        match kind {
            KIND_INTEGER => raw.trim().parse().map(ReadingValue::Integer).map_err(|_| invalid()),
            KIND_DECIMAL => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(ReadingValue::Decimal)
                .ok_or_else(invalid),
            KIND_INSTANT => DateTime::parse_from_rfc3339(raw.trim())
                .map(|dt| ReadingValue::Instant(dt.with_timezone(&Utc)))
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ReadingValue::Integer(v) => Some(v as f64),
            ReadingValue::Decimal(v) => Some(v),
            ReadingValue::Instant(_) => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.as_f64().is_some_and(|v| v < 0.0)
    }

    /// `|self - other|`, always decimal.
    pub fn abs_difference(&self, other: &ReadingValue) -> Option<ReadingValue> {
        Some(ReadingValue::Decimal(
            (self.as_f64()? - other.as_f64()?).abs(),
        ))
    }

    /// `self + |offset|`, keeping integer form when both sides are integers.
    pub fn plus_magnitude(&self, offset: &ReadingValue) -> Option<ReadingValue> {
        match (*self, *offset) {
            (ReadingValue::Integer(a), ReadingValue::Integer(b)) => {
                Some(ReadingValue::Integer(a.saturating_add(b.saturating_abs())))
            }
            _ => Some(ReadingValue::Decimal(
                self.as_f64()? + offset.as_f64()?.abs(),
            )),
        }
    }
}

impl fmt::Display for ReadingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingValue::Integer(v) => write!(f, "{}", v),
            // Whole numbers keep one fractional digit ("9.0") and never switch to exponent form.
            ReadingValue::Decimal(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            ReadingValue::Decimal(v) => write!(f, "{:?}", v),
            ReadingValue::Instant(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Serialize for ReadingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_keep_one_fraction_digit() {
        assert_eq!(ReadingValue::Decimal(9.0).to_string(), "9.0");
        assert_eq!(ReadingValue::Decimal(22.5).to_string(), "22.5");
        assert_eq!(ReadingValue::Integer(26).to_string(), "26");
    }

    #[test]
    fn large_whole_decimals_print_without_exponent() {
        let big = ReadingValue::Decimal(1e16);
        assert_eq!(big.to_string(), "10000000000000000.0");
        assert_eq!(ReadingValue::from_parts(KIND_DECIMAL, &big.to_string()).unwrap(), big);
    }

    #[test]
    fn plus_magnitude_keeps_integers() {
        let total = ReadingValue::Integer(23)
            .plus_magnitude(&ReadingValue::Integer(-3))
            .unwrap();
        assert_eq!(total, ReadingValue::Integer(26));
        let mixed = ReadingValue::Decimal(1.5)
            .plus_magnitude(&ReadingValue::Integer(-2))
            .unwrap();
        assert_eq!(mixed, ReadingValue::Decimal(3.5));
    }

    #[test]
    fn instants_have_no_arithmetic() {
        let sun = ReadingValue::from_parts(KIND_INSTANT, "2024-06-21T05:12:00Z").unwrap();
        assert!(sun.abs_difference(&ReadingValue::Integer(1)).is_none());
        assert_eq!(sun.to_string(), "2024-06-21T05:12:00Z");
    }

    #[test]
    fn from_parts_rejects_mismatched_text() {
        assert!(ReadingValue::from_parts(KIND_INTEGER, "1.5").is_err());
        assert!(ReadingValue::from_parts(KIND_DECIMAL, "NaN").is_err());
        assert!(ReadingValue::from_parts("blob", "1").is_err());
    }
}
