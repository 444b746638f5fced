//! Entry keys and the canonical string-to-integer coercion.

use std::cmp::Ordering;
use std::fmt;

use crate::value::numeric_str;
use crate::{Error, Result, SortMode, Value};

/// The key of a single entry: an integer or a string.
///
/// A string that is the canonical decimal form of a 64-bit integer (no
/// leading `+`, no leading zeros, in range) is coerced to an integer key at
/// every keyed entry point, so `map.set("3", v)` and `map.set(3, v)` address
/// the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key that is not in canonical decimal integer form.
    Str(String),
}

impl Key {
    /// Coerce a string into a key, turning canonical decimal integers into
    /// integer keys.
    pub fn coerce(s: impl Into<String>) -> Self {
        let s = s.into();
        match canonical_int(&s) {
            Some(i) => Self::Int(i),
            None => Self::Str(s),
        }
    }

    /// Cast a value to a key the way native arrays do: null becomes the empty
    /// string key, booleans become `0`/`1`, floats are truncated, and strings
    /// go through the canonical-integer coercion. Lists, nested maps, and
    /// handles have no key form.
    pub fn try_from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Str(String::new())),
            Value::Bool(b) => Ok(Self::Int(i64::from(*b))),
            Value::Int(i) => Ok(Self::Int(*i)),
            Value::Float(f) => Ok(Self::Int(*f as i64)),
            Value::Str(s) => Ok(Self::coerce(s.as_str())),
            Value::List(_) | Value::Map(_) | Value::Handle(_) => Err(Error::invalid_argument(
                format!("cannot use a {} value as a key", value.type_name()),
            )),
        }
    }

    /// Returns the integer form of this key, if it has one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(_) => None,
        }
    }

    /// Returns this key as a [`Value`], as `keys()` and `flip()` need.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(i) => Value::Int(*i),
            Self::Str(s) => Value::Str(s.clone()),
        }
    }

    /// Compare two keys under the given mode. Regular mode orders integer
    /// keys before string keys; numeric mode coerces string keys to numbers
    /// (non-numeric strings count as zero); string mode compares renderings.
    pub fn compare(&self, other: &Self, mode: SortMode) -> Ordering {
        match mode {
            SortMode::Regular => match (self, other) {
                (Self::Int(a), Self::Int(b)) => a.cmp(b),
                (Self::Str(a), Self::Str(b)) => a.cmp(b),
                (Self::Int(_), Self::Str(_)) => Ordering::Less,
                (Self::Str(_), Self::Int(_)) => Ordering::Greater,
            },
            SortMode::Numeric => self.to_number().total_cmp(&other.to_number()),
            SortMode::String => self.to_string().cmp(&other.to_string()),
        }
    }

    /// Re-apply the coercion invariant to a key built directly from parts.
    pub(crate) fn normalize(self) -> Self {
        match self {
            Self::Str(s) => Self::coerce(s),
            key => key,
        }
    }

    fn to_number(&self) -> f64 {
        match self {
            Self::Int(i) => *i as f64,
            Self::Str(s) => numeric_str(s).unwrap_or(0.0),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(key: i64) -> Self {
        Self::Int(key)
    }
}

impl From<i32> for Key {
    fn from(key: i32) -> Self {
        Self::Int(key.into())
    }
}

impl From<u32> for Key {
    fn from(key: u32) -> Self {
        Self::Int(key.into())
    }
}

impl From<usize> for Key {
    fn from(key: usize) -> Self {
        Self::Int(key as i64)
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::coerce(key)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self::coerce(key)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Parses `s` as a canonical decimal integer: an optional leading `-`, no
/// leading `+`, no leading zeros, and within the 64-bit signed range.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s == "-0" {
        return None;
    }
    s.parse().ok()
}
