//! Transformation group: rebuilding, filtering, and folding the entries.

use crate::{Error, Key, Result, Value, VarMap};

impl VarMap {
    /// Returns a new map with the same keys and order, each value replaced
    /// by `f(value, key)`.
    pub fn map(&self, mut f: impl FnMut(&Value, &Key) -> Value) -> Self {
        Self::with_entries(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), f(v, k)))
                .collect(),
        )
    }

    /// Returns a packed map of the values for which `f(value, key)` is true.
    pub fn filter(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> Self {
        Self::from_values(
            self.entries
                .iter()
                .filter(|&(k, v)| f(v, k))
                .map(|(_, v)| v.clone()),
        )
    }

    /// The complement of [`filter`](Self::filter): drops the values for
    /// which `f(value, key)` is true. Packed output.
    pub fn reject(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> Self {
        self.filter(|v, k| !f(v, k))
    }

    /// Recursively concatenates nested lists and maps into a single packed
    /// map of leaf values, depth-first and left-to-right. Values that are
    /// not containers pass through unchanged.
    pub fn flatten(&self) -> Self {
        let mut leaves = Vec::new();
        for value in self.entries.values() {
            flatten_into(value, &mut leaves);
        }
        Self::from_values(leaves)
    }

    /// Concatenates one level of nesting: every top-level value must itself
    /// be a list or map, and their values are packed into a new map in
    /// order.
    pub fn collapse(&self) -> Result<Self> {
        let mut values = Vec::new();
        for (key, value) in &self.entries {
            match value {
                Value::List(items) => values.extend(items.iter().cloned()),
                Value::Map(map) => values.extend(map.entries.values().cloned()),
                other => {
                    return Err(Error::invalid_argument(format!(
                        "collapse requires array-like values; entry {key} is {}",
                        other.type_name()
                    )))
                }
            }
        }
        Ok(Self::from_values(values))
    }

    /// From a map of rows (lists or maps), collects `row[key]` into a packed
    /// map. Rows that are not containers or lack the key are skipped.
    pub fn pluck(&self, key: impl Into<Key>) -> Self {
        let key = key.into();
        Self::from_values(
            self.entries
                .values()
                .filter_map(|row| row_get(row, &key).cloned()),
        )
    }

    /// Like [`pluck`](Self::pluck), but keys the output by each row's value
    /// at `index_key` (cast to a key; duplicate keys keep the last value).
    /// Rows whose index value is missing or not keyable are appended with
    /// the next integer key instead.
    pub fn pluck_with_keys(&self, key: impl Into<Key>, index_key: impl Into<Key>) -> Self {
        let key = key.into();
        let index_key = index_key.into();
        let mut out = Self::new();
        for row in self.entries.values() {
            let Some(plucked) = row_get(row, &key) else {
                continue;
            };
            match row_get(row, &index_key).map(Key::try_from_value) {
                Some(Ok(out_key)) => {
                    out.set(out_key, plucked.clone());
                }
                _ => {
                    out.push(plucked.clone());
                }
            }
        }
        out
    }

    /// In-place [`map`](Self::map): replaces every value with
    /// `f(value, key)` and returns the receiver.
    pub fn transform(&mut self, mut f: impl FnMut(&Value, &Key) -> Value) -> &mut Self {
        for (key, value) in self.entries.iter_mut() {
            *value = f(value, key);
        }
        self
    }

    /// Calls `f(value, key)` for every entry in order, for side effects.
    /// Returning `false` stops the iteration early.
    pub fn each(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> &Self {
        for (key, value) in &self.entries {
            if !f(value, key) {
                break;
            }
        }
        self
    }

    /// Hands the whole collection to `f` once and returns whatever `f`
    /// returns: the escape hatch for custom aggregation.
    pub fn pipe<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        f(self)
    }

    /// Left fold over the values in order.
    pub fn reduce<T>(&self, initial: T, mut f: impl FnMut(T, &Value, &Key) -> T) -> T {
        let mut acc = initial;
        for (key, value) in &self.entries {
            acc = f(acc, value, key);
        }
        acc
    }
}

fn flatten_into(value: &Value, leaves: &mut Vec<Value>) {
    match value {
        Value::List(items) => {
            for item in items {
                flatten_into(item, leaves);
            }
        }
        Value::Map(map) => {
            for item in map.entries.values() {
                flatten_into(item, leaves);
            }
        }
        leaf => leaves.push(leaf.clone()),
    }
}

fn row_get<'a>(row: &'a Value, key: &Key) -> Option<&'a Value> {
    match row {
        Value::Map(map) => map.entries.get(key),
        Value::List(items) => match key {
            Key::Int(i) if *i >= 0 => items.get(*i as usize),
            _ => None,
        },
        _ => None,
    }
}
