//! Macros for building entry-point arguments.
//!
//! - [`macro@crate::kv`] - builds the flat key/value list the entry points
//!   take, converting each item into a [`Value`](crate::types::Value).
//!
//! # Examples
//!
//! ```
//! use smarterr::kv;
//! use smarterr::types::Value;
//!
//! let args = kv!["id", "r-1234567890", "attempt", 2];
//! assert_eq!(args.len(), 4);
//! assert_eq!(args[3], Value::Int(2));
//! ```

/// Builds a `Vec<Value>` of alternating keys and values.
///
/// Any type with a `From` conversion into [`Value`](crate::types::Value)
/// can appear: strings, integers, floats, booleans and `Option`s of them
/// (`None` becomes `Value::Null`, which resolves like a missing argument).
///
/// Keys must be strings; the list is validated when a call parses it, not
/// here.
///
/// # Examples
///
/// ```
/// use smarterr::kv;
///
/// let region: Option<&str> = None;
/// let args = kv!["id", "r-1", "region", region];
/// assert!(args[3].is_null());
///
/// let none = kv![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<$crate::types::Value>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::types::Value::from($item)),+]
    };
}
