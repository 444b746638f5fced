//! Ordering & selection group: the sort family, slicing, and random access.

use std::cmp::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Error, Key, Result, SortMode, Value, VarMap};

impl VarMap {
    fn sorted_entries(
        &self,
        mut cmp: impl FnMut(&(Key, Value), &(Key, Value)) -> Ordering,
    ) -> Vec<(Key, Value)> {
        let mut entries: Vec<(Key, Value)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        // Stable sort, so ties keep their input order.
        entries.sort_by(|a, b| cmp(a, b));
        entries
    }

    /// Returns a packed map of the values sorted ascending under `mode`.
    pub fn sort(&self, mode: SortMode) -> Self {
        Self::from_values(
            self.sorted_entries(|a, b| a.1.compare(&b.1, mode))
                .into_iter()
                .map(|(_, v)| v),
        )
    }

    /// Returns a packed map of the values sorted descending under `mode`.
    pub fn rsort(&self, mode: SortMode) -> Self {
        Self::from_values(
            self.sorted_entries(|a, b| b.1.compare(&a.1, mode))
                .into_iter()
                .map(|(_, v)| v),
        )
    }

    /// Sorts by key ascending, preserving each key's value.
    pub fn ksort(&self, mode: SortMode) -> Self {
        Self::with_entries(
            self.sorted_entries(|a, b| a.0.compare(&b.0, mode))
                .into_iter()
                .collect(),
        )
    }

    /// Sorts by key descending, preserving each key's value.
    pub fn krsort(&self, mode: SortMode) -> Self {
        Self::with_entries(
            self.sorted_entries(|a, b| b.0.compare(&a.0, mode))
                .into_iter()
                .collect(),
        )
    }

    /// Sorts the values with a caller-supplied comparator; packed output.
    /// The comparator must define a total order.
    pub fn usort(&self, mut cmp: impl FnMut(&Value, &Value) -> Ordering) -> Self {
        Self::from_values(
            self.sorted_entries(|a, b| cmp(&a.1, &b.1))
                .into_iter()
                .map(|(_, v)| v),
        )
    }

    /// Comparator-driven value sort that preserves keys.
    pub fn uasort(&self, mut cmp: impl FnMut(&Value, &Value) -> Ordering) -> Self {
        Self::with_entries(
            self.sorted_entries(|a, b| cmp(&a.1, &b.1))
                .into_iter()
                .collect(),
        )
    }

    /// Comparator-driven key sort that preserves each key's value.
    pub fn uksort(&self, mut cmp: impl FnMut(&Key, &Key) -> Ordering) -> Self {
        Self::with_entries(
            self.sorted_entries(|a, b| cmp(&a.0, &b.0))
                .into_iter()
                .collect(),
        )
    }

    /// The first `limit` entries, or the last `|limit|` when `limit` is
    /// negative. Keys and order of the kept slice are preserved.
    pub fn take(&self, limit: i64) -> Self {
        let n = self.len();
        let (skip, take) = if limit >= 0 {
            (0, (limit as usize).min(n))
        } else {
            let take = (limit.unsigned_abs() as usize).min(n);
            (n - take, take)
        };
        Self::with_entries(
            self.entries
                .iter()
                .skip(skip)
                .take(take)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// A contiguous slice. Negative `offset` counts from the end; negative
    /// `len` leaves that many entries off the end; `None` runs to the end.
    /// Packs keys unless `preserve_keys`.
    pub fn slice(&self, offset: i64, len: Option<i64>, preserve_keys: bool) -> Self {
        let n = self.len() as i64;
        let start = if offset < 0 {
            (n + offset).max(0)
        } else {
            offset.min(n)
        };
        let end = match len {
            None => n,
            Some(l) if l < 0 => (n + l).max(start),
            Some(l) => (start.saturating_add(l)).min(n),
        };
        let picked = self
            .entries
            .iter()
            .skip(start as usize)
            .take((end - start) as usize);
        if preserve_keys {
            Self::with_entries(picked.map(|(k, v)| (k.clone(), v.clone())).collect())
        } else {
            Self::from_values(picked.map(|(_, v)| v.clone()))
        }
    }

    /// Splits into consecutive chunks of at most `size` entries, returned as
    /// a packed map of nested maps. Chunk keys are packed unless
    /// `preserve_keys`. A size below 1 is refused.
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> Result<Self> {
        if size < 1 {
            return Err(Error::invalid_argument("chunk size must be at least 1"));
        }
        let entries: Vec<(&Key, &Value)> = self.entries.iter().collect();
        let mut out = Self::new();
        for chunk in entries.chunks(size) {
            let sub = if preserve_keys {
                Self::with_entries(
                    chunk
                        .iter()
                        .map(|(k, v)| ((*k).clone(), (*v).clone()))
                        .collect(),
                )
            } else {
                Self::from_values(chunk.iter().map(|(_, v)| (*v).clone()))
            };
            out.push(Value::Map(sub));
        }
        Ok(out)
    }

    /// Splits into exactly `num` packed chunks, as evenly sized as possible
    /// with the remainder spread over the earliest chunks. A count below 1
    /// is refused.
    pub fn split(&self, num: usize) -> Result<Self> {
        if num < 1 {
            return Err(Error::invalid_argument("split count must be at least 1"));
        }
        let base = self.len() / num;
        let rem = self.len() % num;
        let mut values = self.entries.values();
        let mut out = Self::new();
        for i in 0..num {
            let size = base + usize::from(i < rem);
            let sub = Self::from_values(values.by_ref().take(size).cloned());
            out.push(Value::Map(sub));
        }
        Ok(out)
    }

    /// Reorders all entries uniformly at random in place, reindexing to
    /// packed integer keys, using the process-wide random source.
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::rng())
    }

    /// [`shuffle`](Self::shuffle) with a caller-supplied random source, so
    /// tests can be made deterministic.
    pub fn shuffle_with(&mut self, rng: &mut impl Rng) -> &mut Self {
        let mut values: Vec<Value> = std::mem::take(&mut self.entries).into_values().collect();
        values.shuffle(rng);
        self.next_int = 0;
        for value in values {
            self.push(value);
        }
        self
    }

    /// A packed map of `num` distinct entries' values chosen uniformly at
    /// random, in their original relative order. Asking for more entries
    /// than exist is out of range; asking for fewer than one is invalid.
    pub fn rand(&self, num: usize) -> Result<Self> {
        self.rand_with(num, &mut rand::rng())
    }

    /// [`rand`](Self::rand) with a caller-supplied random source.
    pub fn rand_with(&self, num: usize, rng: &mut impl Rng) -> Result<Self> {
        if num < 1 {
            return Err(Error::invalid_argument(
                "random selection needs a count of at least 1",
            ));
        }
        if num > self.len() {
            return Err(Error::out_of_range(format!(
                "requested {num} random entries from a collection of {}",
                self.len()
            )));
        }
        log::trace!("picking {num} of {} entries", self.len());
        // Partial Fisher-Yates over the indices.
        let mut indices: Vec<usize> = (0..self.len()).collect();
        for i in 0..num {
            let j = rng.random_range(i..indices.len());
            indices.swap(i, j);
        }
        let mut picked = indices[..num].to_vec();
        picked.sort_unstable();
        Ok(Self::from_values(
            picked.into_iter().map(|i| self.entries[i].clone()),
        ))
    }

    /// One value chosen uniformly at random. An empty collection is out of
    /// range.
    pub fn rand_one(&self) -> Result<&Value> {
        self.rand_one_with(&mut rand::rng())
    }

    /// [`rand_one`](Self::rand_one) with a caller-supplied random source.
    pub fn rand_one_with(&self, rng: &mut impl Rng) -> Result<&Value> {
        if self.is_empty() {
            return Err(Error::out_of_range(
                "cannot pick a random entry of an empty collection",
            ));
        }
        Ok(&self.entries[rng.random_range(0..self.len())])
    }

    /// Reverses the entry order. Packs keys unless `preserve_keys`.
    pub fn reverse(&self, preserve_keys: bool) -> Self {
        let reversed = self.entries.iter().rev();
        if preserve_keys {
            Self::with_entries(reversed.map(|(k, v)| (k.clone(), v.clone())).collect())
        } else {
            Self::from_values(reversed.map(|(_, v)| v.clone()))
        }
    }

    /// Drops every value that compares equal (under `mode`) to an earlier
    /// one, keeping first occurrences with their original keys and order.
    pub fn unique(&self, mode: SortMode) -> Self {
        let mut kept: Vec<&Value> = Vec::new();
        let mut entries = indexmap::IndexMap::new();
        for (key, value) in &self.entries {
            if kept
                .iter()
                .any(|seen| seen.compare(value, mode) == Ordering::Equal)
            {
                continue;
            }
            kept.push(value);
            entries.insert(key.clone(), value.clone());
        }
        Self::with_entries(entries)
    }

    /// A packed map of all values, discarding keys.
    pub fn values(&self) -> Self {
        Self::from_values(self.entries.values().cloned())
    }

    /// A packed map of all keys, as values.
    pub fn keys(&self) -> Self {
        Self::from_values(self.entries.keys().map(Key::to_value))
    }
}
