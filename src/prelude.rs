//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use smarterr::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`kv!`]
//! - **Entry points**: [`append_error`], [`add_error`], [`enrich_append`]
//! - **Set-up**: [`set_filesystem`], [`set_log_sink`], [`enable_debug`]
//! - **Types**: [`Context`], [`Diagnostic`], [`Diagnostics`], [`Severity`],
//!   [`Environment`], [`TracedError`], [`MemFs`], [`DirFs`]
//! - **Traits**: [`ErrorSink`], [`FileSystem`], [`LogSink`]
//!
//! # Examples
//!
//! ```
//! use smarterr::prelude::*;
//!
//! let env = Environment::new().with_filesystem(
//!     MemFs::new().with_file(
//!         "internal/smarterr/smarterr.hcl",
//!         r#"
//!         token "id" {
//!           arg = "id"
//!         }
//!         template "error_summary" {
//!           format = "reading {{.id}}"
//!         }
//!         "#,
//!     ),
//!     "internal",
//! );
//!
//! let err = std::io::Error::other("not found");
//! let diags = env.append_error(&Context::new(), Diagnostics::new(), &err, &kv!["id", "r-1"]);
//! assert_eq!(diags[0].summary, "reading r-1");
//! ```

// Macros
pub use crate::kv;

// Entry points and set-up
pub use crate::api::{add_error, append_error, enrich_append};
pub use crate::global::{enable_debug, set_filesystem, set_log_sink};

// Core types
pub use crate::context::Context;
pub use crate::environment::Environment;
pub use crate::traits::{DirFs, MemFs};
pub use crate::types::{Diagnostic, Diagnostics, Severity, TracedError};

// Traits
pub use crate::traits::{ErrorSink, FileSystem, LogSink};
