//! Data model shared by every stage of the formatter.
//!
//! This module holds the parsed configuration blocks, the host-facing
//! diagnostic types, caller arguments, call frames and the values produced
//! by token resolution.
//!
//! # Examples
//!
//! ```
//! use smarterr::types::{Diagnostic, Severity};
//!
//! let diag = Diagnostic::error("creating bucket", "access denied");
//! assert_eq!(diag.severity, Severity::Error);
//! assert_eq!(diag.summary, "creating bucket");
//! ```
use smallvec::SmallVec;

pub mod accumulator;
pub mod config;
pub mod diagnostic;
pub mod frame;
pub mod token_value;
pub mod traced_error;
pub mod value;

pub use accumulator::Accumulator;
pub use config::*;
pub use diagnostic::*;
pub use frame::*;
pub use token_value::*;
pub use traced_error::TracedError;
pub use value::*;

/// SmallVec-backed list used for short per-call collections.
pub type NoteVec<T> = SmallVec<[T; 4]>;
