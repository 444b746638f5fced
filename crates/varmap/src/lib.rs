//! Insertion-ordered key/value collections of dynamically typed values.
//!
//! [`VarMap`] behaves like a dynamic-language array: entries are keyed by
//! integers or strings, iteration follows insertion order, and a large
//! surface of derived operations (transformation, ordering, set algebra,
//! aggregation, mutation) is defined over a handful of primitives.
//! Operations that mutate return the receiver for chaining; the rest build
//! and return a new map.
//!
//! ```
//! use varmap::{SortMode, Value, VarMap};
//!
//! let mut map = VarMap::from_values([3, 1, 2]);
//! map.set("label", "numbers");
//! assert_eq!(map.get("label"), Some(&Value::from("numbers")));
//!
//! let sorted = map.except(["label"]).sort(SortMode::Regular);
//! assert_eq!(sorted, VarMap::from_values([1, 2, 3]));
//! ```
#![deny(missing_docs)]

mod convert;
mod error;
mod key;
mod map;
mod value;

pub use convert::Entries;
pub use error::{Error, ErrorKind, Result};
pub use key::Key;
pub use map::{Countable, VarMap};
pub use value::{Handle, SortMode, Value};
