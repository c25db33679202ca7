//! Index key encoding
//!
//! Every scalar field value is reduced to an `IndexKey` before it reaches an
//! index. Keys are totally ordered so that a field's entries form one sorted
//! key space.

use std::fmt;

/// Index key representing a serialized scalar value.
///
/// Ordering is deterministic: Null < Bool < Number < String.
/// Numbers are stored as order-preserving f64 bits, so integers and floats
/// share one numeric ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// JSON null
    Null,
    /// Boolean value (false < true)
    Bool(bool),
    /// Numeric value (ordered bits, see `from_float`)
    Number(u64),
    /// String value
    String(String),
}

/// The kind of a key, used to reject mixed-type comparisons on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyKind {
    Null,
    Bool,
    Number,
    String,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Null => "null",
            KeyKind::Bool => "bool",
            KeyKind::Number => "number",
            KeyKind::String => "string",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IndexKey {
    /// Create a key from a boolean
    pub fn from_bool(v: bool) -> Self {
        IndexKey::Bool(v)
    }

    /// Create a key from an integer
    pub fn from_int(v: i64) -> Self {
        // Lossy above 2^53, same as any f64-backed document store.
        Self::encode_float(v as f64)
    }

    /// Create a key from a float.
    ///
    /// Returns None for NaN, which has no place in a total order.
    pub fn from_float(v: f64) -> Option<Self> {
        if v.is_nan() {
            return None;
        }
        Some(Self::encode_float(v))
    }

    fn encode_float(v: f64) -> Self {
        // -0.0 and 0.0 must land on the same key
        let v = if v == 0.0 { 0.0 } else { v };
        let bits = v.to_bits();
        let ordered = if (bits >> 63) == 1 {
            !bits // Negative: flip all bits
        } else {
            bits ^ (1 << 63) // Positive: flip sign bit
        };
        IndexKey::Number(ordered)
    }

    /// Create a key from a string
    pub fn from_string(v: impl Into<String>) -> Self {
        IndexKey::String(v.into())
    }

    /// Create a key from a JSON value.
    ///
    /// Arrays and objects have no scalar key and return None.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(IndexKey::Null),
            serde_json::Value::Bool(b) => Some(IndexKey::from_bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(IndexKey::from_int(i))
                } else {
                    n.as_f64().and_then(IndexKey::from_float)
                }
            }
            serde_json::Value::String(s) => Some(IndexKey::from_string(s.as_str())),
            _ => None,
        }
    }

    /// Returns the kind of this key
    pub fn kind(&self) -> KeyKind {
        match self {
            IndexKey::Null => KeyKind::Null,
            IndexKey::Bool(_) => KeyKind::Bool,
            IndexKey::Number(_) => KeyKind::Number,
            IndexKey::String(_) => KeyKind::String,
        }
    }

    /// Decodes a numeric key back to its f64 value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            IndexKey::Number(ordered) => {
                let bits = if (ordered >> 63) == 1 {
                    ordered ^ (1 << 63)
                } else {
                    !ordered
                };
                Some(f64::from_bits(bits))
            }
            _ => None,
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Null => f.write_str("null"),
            IndexKey::Bool(b) => write!(f, "{}", b),
            IndexKey::Number(_) => match self.as_f64() {
                Some(v) => write!(f, "{}", v),
                None => f.write_str("NaN"),
            },
            IndexKey::String(s) => write!(f, "{:?}", s),
        }
    }
}
