use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::num::number::{decimal_to_f64, format_float, format_integer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Undefined,
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Bytes,
    Raw,
    Comment,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "Null",
            ValueKind::Undefined => "Undefined",
            ValueKind::String => "String",
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::Boolean => "Boolean",
            ValueKind::Date => "Date",
            ValueKind::Bytes => "Bytes",
            ValueKind::Raw => "Raw",
            ValueKind::Comment => "Comment",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date payload: either a local date-time or one with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Naive(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S%.f")),
            DateValue::Offset(value) => f.write_str(&value.to_rfc3339()),
        }
    }
}

/// Immutable payload of a value node.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Undefined,
    String(String),
    Integer(i128),
    Float(f64),
    Boolean(bool),
    Date(DateValue),
    Bytes(Vec<u8>),
    /// Verbatim text kept unescaped for pass-through.
    Raw(String),
    Comment(String),
}

impl Scalar {
    /// String scalar where a missing string becomes `""`, not `Null`.
    pub fn string(value: Option<&str>) -> Self {
        Scalar::String(value.unwrap_or_default().to_string())
    }

    /// Fixed-point decimal `mantissa * 10^-scale`, kept as the nearest Float.
    pub fn decimal(mantissa: i128, scale: u32) -> Self {
        Scalar::Float(decimal_to_f64(mantissa, scale))
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Scalar::Raw(text.into())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Scalar::Comment(text.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Scalar::Null => ValueKind::Null,
            Scalar::Undefined => ValueKind::Undefined,
            Scalar::String(_) => ValueKind::String,
            Scalar::Integer(_) => ValueKind::Integer,
            Scalar::Float(_) => ValueKind::Float,
            Scalar::Boolean(_) => ValueKind::Boolean,
            Scalar::Date(_) => ValueKind::Date,
            Scalar::Bytes(_) => ValueKind::Bytes,
            Scalar::Raw(_) => ValueKind::Raw,
            Scalar::Comment(_) => ValueKind::Comment,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(value) | Scalar::Raw(value) | Scalar::Comment(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Scalar::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_i128().and_then(|value| i64::try_from(value).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(value) => Some(*value),
            Scalar::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateValue> {
        match self {
            Scalar::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Scalar::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

/// Canonical text of the payload. Bytes render as lowercase hex.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Undefined => f.write_str("undefined"),
            Scalar::String(value) | Scalar::Raw(value) | Scalar::Comment(value) => {
                f.write_str(value)
            }
            Scalar::Integer(value) => f.write_str(&format_integer(*value)),
            Scalar::Float(value) => f.write_str(&format_float(*value)),
            Scalar::Boolean(value) => f.write_str(if *value { "true" } else { "false" }),
            Scalar::Date(value) => write!(f, "{value}"),
            Scalar::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Integer(value as i128)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<char> for Scalar {
    fn from(value: char) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(value: NaiveDateTime) -> Self {
        Scalar::Date(DateValue::Naive(value))
    }
}

impl From<DateTime<FixedOffset>> for Scalar {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Scalar::Date(DateValue::Offset(value))
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Date(DateValue::Offset(value.fixed_offset()))
    }
}

impl From<&[u8]> for Scalar {
    fn from(value: &[u8]) -> Self {
        Scalar::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(value: Vec<u8>) -> Self {
        Scalar::Bytes(value)
    }
}

/// Durations are stored as ISO 8601 text.
impl From<TimeDelta> for Scalar {
    fn from(value: TimeDelta) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<Uuid> for Scalar {
    fn from(value: Uuid) -> Self {
        Scalar::String(value.hyphenated().to_string())
    }
}
