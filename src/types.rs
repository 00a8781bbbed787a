//! Core value type for query generation
//!
//! `SqlValue` is what an entity hands back for each of its fields. The
//! generator only ever renders it into SQL text.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

// ============================================================================
// Field Values
// ============================================================================

/// A single field value read from an entity instance
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Absent value (`Option::None`)
    Null,

    /// Text value, rendered quoted
    Text(String),

    /// Signed integer, rendered unquoted
    Integer(i64),

    /// Floating point number, rendered unquoted and always with a fractional part
    Float(f64),

    /// Exact decimal, rendered unquoted
    Decimal(Decimal),

    /// Boolean, rendered as `true` / `false`
    Boolean(bool),

    /// UUID, rendered quoted in its hyphenated form
    Uuid(Uuid),

    /// UTC timestamp, rendered quoted in RFC 3339 form
    Timestamp(DateTime<Utc>),

    /// Arbitrary JSON document, rendered quoted
    Json(serde_json::Value),
}

impl SqlValue {
    /// Whether this value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Whether this value is a NaN or infinite float, which has no SQL literal
    pub fn is_non_finite(&self) -> bool {
        matches!(self, SqlValue::Float(x) if !x.is_finite())
    }

    /// Whether this value is written as a quoted SQL string literal
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            SqlValue::Text(_) | SqlValue::Uuid(_) | SqlValue::Timestamp(_) | SqlValue::Json(_)
        )
    }

    /// Convert a JSON value into a field value
    ///
    /// Numbers become `Integer` when they fit in an `i64`, `Decimal` when they
    /// are unsigned values beyond that range, `Float` otherwise. Arrays and
    /// objects are kept as `Json`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SqlValue::Null,
            serde_json::Value::Bool(b) => SqlValue::Boolean(*b),
            serde_json::Value::String(s) => SqlValue::Text(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqlValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    SqlValue::Decimal(Decimal::from(u))
                } else {
                    n.as_f64()
                        .map_or_else(|| SqlValue::Json(value.clone()), SqlValue::Float)
                }
            }
            other => SqlValue::Json(other.clone()),
        }
    }
}

/// Natural string form of the value, without any quoting
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("null"),
            SqlValue::Text(s) => f.write_str(s),
            SqlValue::Integer(i) => write!(f, "{}", i),
            // Debug keeps the trailing `.0` on integral floats
            SqlValue::Float(x) => write!(f, "{:?}", x),
            SqlValue::Decimal(d) => write!(f, "{}", d),
            SqlValue::Boolean(b) => write!(f, "{}", b),
            SqlValue::Uuid(u) => write!(f, "{}", u.hyphenated()),
            SqlValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            SqlValue::Json(v) => write!(f, "{}", v),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SqlValue {
                fn from(value: $t) -> Self {
                    SqlValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for SqlValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => SqlValue::Integer(i),
            Err(_) => SqlValue::Decimal(Decimal::from(value)),
        }
    }
}

impl From<f32> for SqlValue {
    fn from(value: f32) -> Self {
        // Shortest decimal form; a plain binary widening adds digits
        let shortest = value.to_string().parse().unwrap_or(f64::from(value));
        SqlValue::Float(shortest)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Boolean(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        SqlValue::Text(value.clone())
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(value: serde_json::Value) -> Self {
        SqlValue::from_json(&value)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}
