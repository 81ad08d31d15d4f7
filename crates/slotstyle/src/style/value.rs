//! Concrete property values.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// A single style property value.
///
/// The engine never interprets values: `"red"`, `"#ff0000"` and `2` are all
/// opaque payloads that the rendering layer makes sense of. Only the
/// scalar kinds a terminal style can carry are accepted.
///
/// # Example
///
/// ```rust
/// use slotstyle::PropValue;
///
/// let fg: PropValue = "cyan".into();
/// let padding: PropValue = 2i64.into();
/// let bold: PropValue = true.into();
///
/// assert_eq!(fg.as_str(), Some("cyan"));
/// assert_eq!(padding.as_int(), Some(2));
/// assert_eq!(bold.as_bool(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Text value (colors, border names, alignment keywords).
    Str(String),
    /// Integer value (cell counts, widths).
    Int(i64),
    /// Fractional value (ratios, opacity).
    Float(f64),
    /// Flag value (bold, italic).
    Bool(bool),
}

impl PropValue {
    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the integer value, if present.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the float value, if present.
    ///
    /// Integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropValue::Float(n) => Some(*n),
            PropValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a variant value key.
    ///
    /// Variant tables are keyed by strings, so a boolean prop `true`
    /// selects the variant value `"true"` and `3` selects `"3"`.
    pub fn to_variant_key(&self) -> String {
        match self {
            PropValue::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Str(s) => write!(f, "{}", s),
            PropValue::Int(n) => write!(f, "{}", n),
            PropValue::Float(n) => write!(f, "{}", n),
            PropValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Float(n)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PropValue {
                fn from(n: $t) -> Self {
                    PropValue::Int(n as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Str(s) => serializer.serialize_str(s),
            PropValue::Int(n) => serializer.serialize_i64(*n),
            PropValue::Float(n) => serializer.serialize_f64(*n),
            PropValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for PropValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PropValueVisitor)
    }
}

struct PropValueVisitor;

impl<'de> Visitor<'de> for PropValueVisitor {
    type Value = PropValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(PropValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PropValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v)
            .map(PropValue::Int)
            .unwrap_or(PropValue::Float(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(PropValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PropValue::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PropValue::Str(v))
    }
}
