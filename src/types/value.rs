//! Caller-supplied key/value arguments.
//!
//! Callers pass a flat list alternating keys and values, usually built with
//! the [`kv!`](crate::kv) macro. [`Args::parse`] turns it into an ordered map
//! and reports malformed lists instead of failing.

use crate::types::Accumulator;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dynamically typed argument or context value, stringified at
/// resolution time.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    #[default]
    Null,
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string payload if this value can act as a key.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Null => f.write_str("<nil>"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value as $target)
                }
            }
        )*
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(UInt as u64: u8, u16, u32, u64, usize);
value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Ordered map of parsed caller arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    entries: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an alternating key/value list.
    ///
    /// An odd-length list drops the dangling item; a non-string key discards
    /// the whole list. Both cases leave a note in `notes`.
    pub fn parse(items: &[Value], notes: &mut Accumulator<String>) -> Self {
        let mut pairs = items.chunks_exact(2);
        let mut entries = Vec::with_capacity(items.len() / 2);
        for (index, pair) in pairs.by_ref().enumerate() {
            let Some(key) = pair[0].as_str() else {
                notes.push(format!(
                    "argument key at position {} is not a string ({:?}); ignoring all arguments",
                    index * 2,
                    pair[0]
                ));
                return Self::default();
            };
            entries.push((key.to_string(), pair[1].clone()));
        }
        if let [dangling] = pairs.remainder() {
            notes.push(format!(
                "odd number of key/value arguments; dropped dangling item {dangling:?}"
            ));
        }
        Self { entries }
    }

    /// Returns the last value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
