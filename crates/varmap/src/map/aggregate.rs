//! Aggregation & search group: numeric summaries and entry lookup.

use crate::value::Number;
use crate::{Key, Value, VarMap};

impl VarMap {
    /// Sum of the values under numeric coercion. Non-numeric values count
    /// as zero; the result stays an integer until a float (or an overflow)
    /// forces it wider. `None` on an empty collection.
    pub fn sum(&self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        let mut int_sum: i64 = 0;
        let mut float_sum = 0.0;
        let mut float_mode = false;
        for value in self.entries.values() {
            match value.exact_number() {
                Some(Number::Int(i)) if !float_mode => match int_sum.checked_add(i) {
                    Some(sum) => int_sum = sum,
                    None => {
                        float_mode = true;
                        float_sum = int_sum as f64 + i as f64;
                    }
                },
                Some(Number::Int(i)) => float_sum += i as f64,
                Some(Number::Float(f)) => {
                    if !float_mode {
                        float_mode = true;
                        float_sum = int_sum as f64;
                    }
                    float_sum += f;
                }
                None => {}
            }
        }
        Some(if float_mode {
            Value::Float(float_sum)
        } else {
            Value::Int(int_sum)
        })
    }

    /// Arithmetic mean over all entries (non-numeric values count as zero).
    /// `None` on an empty collection.
    pub fn avg(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total: f64 = self.entries.values().filter_map(Value::as_number).sum();
        Some(total / self.len() as f64)
    }

    /// Median of the numeric values: the middle of the ascending-sorted
    /// numerics, or the mean of the two middles for even counts. `None`
    /// when there are no numeric values.
    pub fn median(&self) -> Option<f64> {
        let mut numbers: Vec<f64> = self.entries.values().filter_map(Value::as_number).collect();
        if numbers.is_empty() {
            return None;
        }
        numbers.sort_by(f64::total_cmp);
        let mid = numbers.len() / 2;
        Some(if numbers.len() % 2 == 1 {
            numbers[mid]
        } else {
            (numbers[mid - 1] + numbers[mid]) / 2.0
        })
    }

    /// The numerically smallest value, ignoring non-numeric values. `None`
    /// when no value is numeric.
    pub fn min(&self) -> Option<&Value> {
        self.entries
            .values()
            .filter_map(|v| v.as_number().map(|n| (v, n)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, _)| v)
    }

    /// The numerically largest value, ignoring non-numeric values. `None`
    /// when no value is numeric.
    pub fn max(&self) -> Option<&Value> {
        self.entries
            .values()
            .filter_map(|v| v.as_number().map(|n| (v, n)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, _)| v)
    }

    /// Membership test: loose equality by default, same-type-and-value when
    /// `strict`.
    pub fn contains(&self, value: &Value, strict: bool) -> bool {
        self.key_of(value, strict).is_some()
    }

    /// The key of the first entry whose value matches, under the
    /// [`contains`](Self::contains) semantics, or `None`.
    pub fn key_of(&self, value: &Value, strict: bool) -> Option<&Key> {
        self.entries
            .iter()
            .find(|&(_, v)| {
                if strict {
                    v.strict_eq(value)
                } else {
                    v.loose_eq(value)
                }
            })
            .map(|(k, _)| k)
    }

    /// The key of the first entry for which `f(value, key)` is true, or
    /// `None`.
    pub fn search(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> Option<&Key> {
        self.entries.iter().find(|&(k, v)| f(v, k)).map(|(k, _)| k)
    }

    /// A packed map of the keys of every matching entry, in discovery
    /// order.
    pub fn search_all(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> Self {
        Self::from_values(
            self.entries
                .iter()
                .filter(|&(k, v)| f(v, k))
                .map(|(k, _)| k.to_value()),
        )
    }

    /// The first value for which `f(value, key)` is true, scanning forward,
    /// or `None`.
    pub fn first(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> Option<&Value> {
        self.entries.iter().find(|&(k, v)| f(v, k)).map(|(_, v)| v)
    }

    /// The last value for which `f(value, key)` is true, scanning backward,
    /// or `None`.
    pub fn last(&self, mut f: impl FnMut(&Value, &Key) -> bool) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|&(k, v)| f(v, k))
            .map(|(_, v)| v)
    }

    /// The first value, unconditionally, or `None` if empty.
    pub fn start(&self) -> Option<&Value> {
        self.entries.first().map(|(_, v)| v)
    }

    /// The last value, unconditionally, or `None` if empty.
    pub fn end(&self) -> Option<&Value> {
        self.entries.last().map(|(_, v)| v)
    }

    /// The first key in current order, or `None` if empty.
    pub fn first_key(&self) -> Option<&Key> {
        self.entries.first().map(|(k, _)| k)
    }

    /// The last key in current order, or `None` if empty.
    pub fn last_key(&self) -> Option<&Key> {
        self.entries.last().map(|(k, _)| k)
    }

    /// Joins the string renderings of all values with `glue`.
    pub fn implode(&self, glue: &str) -> String {
        let mut joined = String::new();
        for (i, value) in self.entries.values().enumerate() {
            if i > 0 {
                joined.push_str(glue);
            }
            joined.push_str(&value.render());
        }
        joined
    }
}
