//! Mutation group: in-place stack and queue operations.
//!
//! `push`, `set`, `remove`, `pull`, and `clear` are primitives and live in
//! the parent module.

use crate::{Key, Value, VarMap};

impl VarMap {
    /// Appends each of `values` under fresh integer keys.
    pub fn add(&mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> &mut Self {
        for value in values {
            self.push(value);
        }
        self
    }

    /// Prepends `values`. All integer keys (new and existing) are
    /// renumbered sequentially from zero in order; string keys are kept.
    pub fn unshift(&mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> &mut Self {
        let old = std::mem::take(&mut self.entries);
        self.next_int = 0;
        for value in values {
            self.push(value);
        }
        for (key, value) in old {
            match key {
                Key::Int(_) => {
                    self.push(value);
                }
                Key::Str(_) => {
                    self.set(key, value);
                }
            }
        }
        self
    }

    /// Removes and returns the last value, or `None` if empty. The next
    /// integer key drops back to just past the remaining maximum.
    pub fn pop(&mut self) -> Option<Value> {
        let (_, value) = self.entries.pop()?;
        self.next_int = super::next_int_after(&self.entries);
        Some(value)
    }

    /// Removes and returns the first value, or `None` if empty. Remaining
    /// integer keys are renumbered downward from zero; string keys are
    /// kept.
    pub fn shift(&mut self) -> Option<Value> {
        let (_, value) = self.entries.shift_remove_index(0)?;
        let old = std::mem::take(&mut self.entries);
        self.next_int = 0;
        for (key, entry) in old {
            match key {
                Key::Int(_) => {
                    self.push(entry);
                }
                Key::Str(_) => {
                    self.set(key, entry);
                }
            }
        }
        Some(value)
    }
}
