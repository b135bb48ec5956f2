//! Explicit coercion table from [`Value`] cells to Rust types.
//!
//! Each target type decides, per value kind, whether it can represent the
//! cell. A `None` from [`FromValue::from_value`] becomes a
//! [`crate::CursorError::TypeCoercion`] at the cursor. Null cells never reach
//! `from_value`; the cursor asks [`FromValue::from_null`] for the type's
//! default and raises the was-null flag.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive, Zero};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::value::Value;

/// A type a cursor accessor can produce from a cell.
pub trait FromValue: Sized {
    /// Accessor name used in coercion errors (e.g. `"int"`).
    const NAME: &'static str;

    /// Value returned for a null cell.
    fn from_null() -> Self;

    /// Convert a non-null cell, or `None` if this type cannot represent it.
    fn from_value(value: &Value) -> Option<Self>;
}

impl<T: FromValue> FromValue for Option<T> {
    const NAME: &'static str = T::NAME;

    fn from_null() -> Self {
        None
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}

impl FromValue for Value {
    const NAME: &'static str = "object";

    fn from_null() -> Self {
        Self::Null
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const NAME: &'static str = "string";

    fn from_null() -> Self {
        Self::new()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Integer(v) => Some(v.to_string()),
            Value::Double(v) => Some(v.to_string()),
            Value::Timestamp(v) => Some(v.to_rfc3339()),
            Value::Decimal(v) => Some(v.to_string()),
            Value::Null | Value::Bytes(_) => None,
        }
    }
}

impl FromValue for i64 {
    const NAME: &'static str = "long";

    fn from_null() -> Self {
        0
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(Self::from(*v)),
            Value::Integer(v) => Some(*v),
            Value::Double(v) => f64_to_i64(*v),
            Value::Text(v) => v.trim().parse().ok(),
            Value::Decimal(v) => v.with_scale(0).to_i64(),
            Value::Null | Value::Timestamp(_) | Value::Bytes(_) => None,
        }
    }
}

impl FromValue for i32 {
    const NAME: &'static str = "int";

    fn from_null() -> Self {
        0
    }

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|v| Self::try_from(v).ok())
    }
}

impl FromValue for f64 {
    const NAME: &'static str = "double";

    fn from_null() -> Self {
        0.0
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Integer(v) => Some(*v as Self),
            Value::Double(v) => Some(*v),
            Value::Text(v) => v.trim().parse().ok(),
            Value::Decimal(v) => v.to_f64(),
            Value::Null | Value::Timestamp(_) | Value::Bytes(_) => None,
        }
    }
}

impl FromValue for bool {
    const NAME: &'static str = "boolean";

    fn from_null() -> Self {
        false
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            Value::Integer(v) => Some(*v != 0),
            Value::Double(v) => Some(*v != 0.0),
            Value::Decimal(v) => Some(!v.is_zero()),
            Value::Text(v) => match v.trim() {
                s if s.eq_ignore_ascii_case("true") || s == "1" => Some(true),
                s if s.eq_ignore_ascii_case("false") || s == "0" => Some(false),
                _ => None,
            },
            Value::Null | Value::Timestamp(_) | Value::Bytes(_) => None,
        }
    }
}

impl FromValue for BigDecimal {
    const NAME: &'static str = "decimal";

    fn from_null() -> Self {
        Self::zero()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(Self::from(*v)),
            Value::Double(v) => Self::try_from(*v).ok(),
            Value::Decimal(v) => Some(v.clone()),
            Value::Text(v) => Self::from_str(v.trim()).ok(),
            Value::Null | Value::Boolean(_) | Value::Timestamp(_) | Value::Bytes(_) => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    const NAME: &'static str = "timestamp";

    fn from_null() -> Self {
        Self::default()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(*v),
            Value::Text(v) => parse_timestamp(v),
            Value::Integer(millis) => Self::from_timestamp_millis(*millis),
            Value::Null
            | Value::Boolean(_)
            | Value::Double(_)
            | Value::Decimal(_)
            | Value::Bytes(_) => None,
        }
    }
}

impl FromValue for Vec<u8> {
    const NAME: &'static str = "bytes";

    fn from_null() -> Self {
        Self::new()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v.clone()),
            Value::Text(v) => Some(v.as_bytes().to_vec()),
            _ => None,
        }
    }
}

/// Truncate toward zero; `None` for non-finite or out-of-range input.
fn f64_to_i64(v: f64) -> Option<i64> {
    let truncated = v.trunc();
    // i64::MAX is not representable as f64; 2^63 is the first value past it.
    if truncated.is_finite()
        && truncated >= -9_223_372_036_854_775_808.0
        && truncated < 9_223_372_036_854_775_808.0
    {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Parse a timestamp stored as text.
///
/// Accepts RFC 3339 (`"2026-02-09T14:30:00.250Z"`), `SQLite`'s
/// `"2026-02-09 14:30:00"` with optional fraction, and a bare date
/// (`"2026-02-09"`, read as midnight). Offset-less forms are taken as UTC.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
