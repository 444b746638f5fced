//! Dynamically typed entry values.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::VarMap;

/// A dynamically typed value held by a [`VarMap`] entry.
///
/// Equality via `==` is strict: both sides must have the same type and the
/// same contents. The membership and set operations default to
/// [`loose_eq`](Value::loose_eq), which allows the usual dynamic-language
/// coercions (`1` equals `"1"`, `true` equals any truthy operand).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A string.
    Str(String),
    /// A sequence of values.
    List(Vec<Value>),
    /// A nested collection.
    Map(VarMap),
    /// An opaque handle compared by reference identity.
    Handle(Handle),
}

impl Value {
    /// A short name for this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Handle(_) => "handle",
        }
    }

    /// True if this is `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric coercion: integers and floats convert directly, numeric
    /// strings are parsed, everything else is non-numeric and yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(s) => numeric_str(s),
            _ => None,
        }
    }

    /// Truthiness: null, `false`, zero, the empty string, `"0"`, and empty
    /// containers are falsy; everything else is truthy.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty() && s != "0",
            Self::List(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
            Self::Handle(_) => true,
        }
    }

    /// Strict equality: same type, same contents. Handles compare by
    /// reference identity; nested maps compare entry-for-entry in order.
    pub fn strict_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Loose equality with dynamic-language coercions.
    ///
    /// Numbers (including numeric strings) compare numerically, booleans
    /// compare against the other operand's truthiness, null equals any empty
    /// scalar or container, and lists/maps compare element-wise. Containers
    /// are never loosely equal to scalars.
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bool(b), v) | (v, Self::Bool(b)) => *b == v.truthy(),
            (Self::Null, v) | (v, Self::Null) => match v {
                Self::Int(i) => *i == 0,
                Self::Float(f) => *f == 0.0,
                Self::Str(s) => s.is_empty(),
                Self::List(items) => items.is_empty(),
                Self::Map(map) => map.is_empty(),
                _ => false,
            },
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Self::Map(a), Self::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.loose_eq(w)))
            }
            (Self::Handle(a), Self::Handle(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => match (numeric_str(a), numeric_str(b)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
            (a, b) => match (a.as_number(), b.as_number()) {
                // Int/Float/numeric-string combinations.
                (Some(x), Some(y)) => x == y,
                // A number against a non-numeric string compares as strings.
                _ => match (a, b) {
                    (Self::Str(s), n) | (n, Self::Str(s)) => {
                        n.as_number().is_some() && n.render() == *s
                    }
                    _ => false,
                },
            },
        }
    }

    /// The string rendering used by string-mode comparison, `unique`,
    /// `diff`/`intersect`, and `implode`: null and `false` render empty,
    /// `true` renders as `1`, numbers in decimal form, strings as
    /// themselves, and containers in their display form.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(false) => String::new(),
            Self::Bool(true) => "1".to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(_) | Self::Map(_) | Self::Handle(_) => self.to_string(),
        }
    }

    /// Compare two values under the given mode, as a strict total order.
    ///
    /// Numeric mode coerces both sides (non-numeric counts as zero); string
    /// mode compares renderings; regular mode compares numerically when both
    /// sides are numeric and otherwise falls back to a documented per-type
    /// order (null < bool < numbers < strings < lists < maps < handles).
    pub fn compare(&self, other: &Self, mode: SortMode) -> Ordering {
        match mode {
            SortMode::Regular => self.compare_regular(other),
            SortMode::Numeric => self
                .as_number()
                .unwrap_or(0.0)
                .total_cmp(&other.as_number().unwrap_or(0.0)),
            SortMode::String => self.render().cmp(&other.render()),
        }
    }

    fn compare_regular(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a.total_cmp(&b);
        }
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            // At most one side is numeric here; numeric strings sort with the
            // numbers so the order stays transitive.
            (Self::Str(a), Self::Str(b)) => match (numeric_str(a).is_some(), numeric_str(b).is_some()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.cmp(b),
            },
            (Self::List(a), Self::List(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| pairwise(a.iter(), b.iter())),
            (Self::Map(a), Self::Map(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| pairwise(a.iter().map(|(_, v)| v), b.iter().map(|(_, v)| v))),
            (Self::Handle(a), Self::Handle(b)) => a.addr().cmp(&b.addr()),
            (a, b) => a.type_rank().cmp(&b.type_rank()),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Str(s) if numeric_str(s).is_some() => 2,
            Self::Str(_) => 3,
            Self::List(_) => 4,
            Self::Map(_) => 5,
            Self::Handle(_) => 6,
        }
    }

    /// The exact numeric form of this value, preserving integer-ness, used
    /// by `sum` to stay integral when it can.
    pub(crate) fn exact_number(&self) -> Option<Number> {
        match self {
            Self::Int(i) => Some(Number::Int(*i)),
            Self::Float(f) => Some(Number::Float(*f)),
            Self::Str(s) => {
                let t = s.trim();
                match t.parse::<i64>() {
                    Ok(i) => Some(Number::Int(i)),
                    Err(_) => numeric_str(s).map(Number::Float),
                }
            }
            _ => None,
        }
    }
}

fn pairwise<'a>(
    a: impl Iterator<Item = &'a Value>,
    b: impl Iterator<Item = &'a Value>,
) -> Ordering {
    for (x, y) in a.zip(b) {
        match x.compare_regular(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

/// Parses a numeric string. Surrounding whitespace is allowed; alphabetic
/// forms (`inf`, `nan`, hex) are not numeric.
pub(crate) fn numeric_str(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() || t.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }
    t.parse().ok()
}

/// Comparison mode for the sort family and `unique`, mirroring the classic
/// sort-flag configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Compare numerically when both sides are numeric, otherwise by type
    /// and then per-type ordering.
    #[default]
    Regular,
    /// Coerce both sides to numbers; non-numeric values count as zero.
    Numeric,
    /// Compare string renderings.
    String,
}

/// An opaque value with reference identity: two handles are equal only when
/// they share the same allocation.
#[derive(Clone)]
pub struct Handle(Arc<dyn Any + Send + Sync>);

impl Handle {
    /// Wrap an arbitrary payload in a handle.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    /// Borrow the payload if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.addr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => write!(f, "{map}"),
            Self::Handle(_) => f.write_str("handle"),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<VarMap> for Value {
    fn from(value: VarMap) -> Self {
        Self::Map(value)
    }
}

impl From<Handle> for Value {
    fn from(value: Handle) -> Self {
        Self::Handle(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize, T: Into<Value>> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}
