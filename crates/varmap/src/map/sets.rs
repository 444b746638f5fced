//! Set & merge group: operations combining the receiver with other
//! array-like collections.

use std::collections::HashSet;

use crate::{Entries, Error, Key, Result, VarMap};

impl VarMap {
    /// Entries whose value does not appear in any of the given collections.
    /// Values are matched by string rendering; receiver keys and order are
    /// preserved. At least one collection is required.
    pub fn diff<A: Entries>(&self, others: impl IntoIterator<Item = A>) -> Result<Self> {
        let rendered = rendered_value_sets(others)?;
        if rendered.is_empty() {
            return Err(Error::invalid_argument(
                "diff requires at least one collection argument",
            ));
        }
        Ok(Self::with_entries(
            self.entries
                .iter()
                .filter(|(_, v)| {
                    let r = v.render();
                    !rendered.iter().any(|set| set.contains(&r))
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ))
    }

    /// Entries whose value appears in every one of the given collections.
    /// Values are matched by string rendering; receiver keys and order are
    /// preserved. At least one collection is required.
    pub fn intersect<A: Entries>(&self, others: impl IntoIterator<Item = A>) -> Result<Self> {
        let rendered = rendered_value_sets(others)?;
        if rendered.is_empty() {
            return Err(Error::invalid_argument(
                "intersect requires at least one collection argument",
            ));
        }
        Ok(Self::with_entries(
            self.entries
                .iter()
                .filter(|(_, v)| {
                    let r = v.render();
                    rendered.iter().all(|set| set.contains(&r))
                })
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ))
    }

    /// Merges the receiver with the given collections, left to right:
    /// values under string keys overwrite earlier ones in place, while
    /// integer-keyed values are renumbered sequentially and appended, never
    /// overwritten. At least one collection is required.
    pub fn merge<A: Entries>(&self, others: impl IntoIterator<Item = A>) -> Result<Self> {
        let others: Vec<Vec<(Key, crate::Value)>> = others
            .into_iter()
            .map(|other| other.entries())
            .collect::<Result<_>>()?;
        if others.is_empty() {
            return Err(Error::invalid_argument(
                "merge requires at least one collection argument",
            ));
        }
        let mut merged = Self::new();
        for (key, value) in &self.entries {
            match key {
                Key::Int(_) => {
                    merged.push(value.clone());
                }
                Key::Str(_) => {
                    merged.set(key.clone(), value.clone());
                }
            }
        }
        for entries in others {
            for (key, value) in entries {
                match key {
                    Key::Int(_) => {
                        merged.push(value);
                    }
                    Key::Str(_) => {
                        merged.set(key, value);
                    }
                }
            }
        }
        Ok(merged)
    }

    /// A new map keyed by the receiver's values, with values taken
    /// positionally from `values`. The lengths must match, and every
    /// receiver value must be castable to a key.
    pub fn combine<A: Entries>(&self, values: A) -> Result<Self> {
        let values = values.entries()?;
        if values.len() != self.len() {
            return Err(Error::invalid_argument(format!(
                "combine requires matching lengths; {} keys but {} values",
                self.len(),
                values.len()
            )));
        }
        let mut combined = Self::new();
        for (key_source, (_, value)) in self.entries.values().zip(values) {
            combined.set(Key::try_from_value(key_source)?, value);
        }
        Ok(combined)
    }

    /// Like [`merge`](Self::merge) for a single collection, except matching
    /// integer keys are overwritten in place rather than appended.
    pub fn replace<A: Entries>(&self, items: A) -> Result<Self> {
        let items = items.entries()?;
        let mut replaced = self.clone();
        for (key, value) in items {
            replaced.set(key, value);
        }
        Ok(replaced)
    }

    /// Keeps only the named keys, preserving order and original keys.
    pub fn only(&self, keys: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        let wanted: HashSet<Key> = keys.into_iter().map(|k| k.into().normalize()).collect();
        Self::with_entries(
            self.entries
                .iter()
                .filter(|(k, _)| wanted.contains(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Drops the named keys, preserving order and original keys of the
    /// rest.
    pub fn except(&self, keys: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        let unwanted: HashSet<Key> = keys.into_iter().map(|k| k.into().normalize()).collect();
        Self::with_entries(
            self.entries
                .iter()
                .filter(|(k, _)| !unwanted.contains(*k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Exchanges keys and values. Values that cannot be cast to keys are
    /// skipped with a warning; a value occurring twice keeps the last key.
    pub fn flip(&self) -> Self {
        let mut flipped = Self::new();
        for (key, value) in &self.entries {
            match Key::try_from_value(value) {
                Ok(new_key) => {
                    flipped.set(new_key, key.to_value());
                }
                Err(_) => {
                    log::warn!("flip: skipping {} value at key {key}", value.type_name());
                }
            }
        }
        flipped
    }
}

fn rendered_value_sets<A: Entries>(
    others: impl IntoIterator<Item = A>,
) -> Result<Vec<HashSet<String>>> {
    others
        .into_iter()
        .map(|other| {
            Ok(other
                .entries()?
                .into_iter()
                .map(|(_, v)| v.render())
                .collect())
        })
        .collect()
}
