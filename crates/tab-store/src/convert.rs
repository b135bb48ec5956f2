//! Conversions between cursor [`Value`]s and libSQL values.
//!
//! libSQL stores five storage classes. Richer cell kinds are bound as one of
//! them and, when the declared column type is known, decoded back on read.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use tab_core::{Value, parse_timestamp};

use crate::schema::SqlType;

/// Fixed-width UTC text so stored timestamps sort chronologically.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Render a timestamp the way it is stored.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Bind a cell as a statement parameter.
#[must_use]
pub fn to_sql_value(value: &Value) -> libsql::Value {
    match value {
        Value::Null => libsql::Value::Null,
        Value::Boolean(v) => libsql::Value::Integer(i64::from(*v)),
        Value::Integer(v) => libsql::Value::Integer(*v),
        Value::Double(v) => libsql::Value::Real(*v),
        Value::Text(v) => libsql::Value::Text(v.clone()),
        Value::Timestamp(v) => libsql::Value::Text(format_timestamp(v)),
        Value::Decimal(v) => libsql::Value::Text(v.to_string()),
        Value::Bytes(v) => libsql::Value::Blob(v.clone()),
    }
}

/// Read a libSQL value with no declared-type information.
#[must_use]
pub fn from_sql_value(value: libsql::Value) -> Value {
    match value {
        libsql::Value::Null => Value::Null,
        libsql::Value::Integer(v) => Value::Integer(v),
        libsql::Value::Real(v) => Value::Double(v),
        libsql::Value::Text(v) => Value::Text(v),
        libsql::Value::Blob(v) => Value::Bytes(v),
    }
}

/// Upgrade a raw cell using the column's declared type.
///
/// Cells that do not fit the declared type come back unchanged.
#[must_use]
pub fn decode_declared(value: Value, declared: Option<SqlType>) -> Value {
    match (declared, value) {
        (Some(SqlType::Timestamp | SqlType::Date), Value::Text(text)) => {
            parse_timestamp(&text).map_or(Value::Text(text), Value::Timestamp)
        }
        (Some(SqlType::Boolean), Value::Integer(v)) => Value::Boolean(v != 0),
        (Some(SqlType::Decimal), Value::Integer(v)) => Value::Decimal(BigDecimal::from(v)),
        // NUMERIC affinity stores decimal text as REAL; the shortest
        // round-trip rendering recovers the digits that were written.
        (Some(SqlType::Decimal), Value::Double(v)) => {
            BigDecimal::from_str(&v.to_string()).map_or(Value::Double(v), Value::Decimal)
        }
        (Some(SqlType::Decimal), Value::Text(text)) => {
            BigDecimal::from_str(&text).map_or(Value::Text(text), Value::Decimal)
        }
        (_, value) => value,
    }
}
