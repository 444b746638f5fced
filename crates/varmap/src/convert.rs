//! Conversion of array-like arguments at the collection boundary.

use crate::{Error, Key, Result, Value, VarMap};

/// An array-like source of `(key, value)` entries.
///
/// The set and merge operations ([`diff`](VarMap::diff),
/// [`intersect`](VarMap::intersect), [`merge`](VarMap::merge),
/// [`combine`](VarMap::combine), [`replace`](VarMap::replace)) accept any
/// argument implementing this trait. `Value` implements it fallibly: lists
/// and nested maps convert, every other variant is refused with an
/// invalid-argument error.
pub trait Entries {
    /// Returns the entries of this source in order.
    fn entries(&self) -> Result<Vec<(Key, Value)>>;
}

impl<T: Entries + ?Sized> Entries for &T {
    fn entries(&self) -> Result<Vec<(Key, Value)>> {
        (**self).entries()
    }
}

impl Entries for VarMap {
    fn entries(&self) -> Result<Vec<(Key, Value)>> {
        Ok(self.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl Entries for Value {
    fn entries(&self) -> Result<Vec<(Key, Value)>> {
        match self {
            Value::List(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, v)| (Key::Int(i as i64), v.clone()))
                .collect()),
            Value::Map(map) => Entries::entries(map),
            other => Err(Error::invalid_argument(format!(
                "expected an array-like value, got {}",
                other.type_name()
            ))),
        }
    }
}

impl<T: Into<Value> + Clone> Entries for Vec<T> {
    fn entries(&self) -> Result<Vec<(Key, Value)>> {
        Ok(self
            .iter()
            .enumerate()
            .map(|(i, v)| (Key::Int(i as i64), v.clone().into()))
            .collect())
    }
}

impl<const N: usize, T: Into<Value> + Clone> Entries for [T; N] {
    fn entries(&self) -> Result<Vec<(Key, Value)>> {
        Ok(self
            .iter()
            .enumerate()
            .map(|(i, v)| (Key::Int(i as i64), v.clone().into()))
            .collect())
    }
}
