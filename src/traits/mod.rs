//! Seams between the formatter and its host.
//!
//! - [`FileSystem`]: where configuration files come from (embedded or on disk)
//! - [`LogSink`]: where rendered log templates go
//! - [`ErrorSink`]: a diagnostics collection mutated in place
//! - [`NamedBlock`]: the only thing the merger knows about a config block
//!
//! # Examples
//!
//! ```
//! use smarterr::traits::{ErrorSink, FileSystem, MemFs};
//! use smarterr::types::Diagnostics;
//!
//! let fs = MemFs::new().with_file("internal/smarterr.hcl", "");
//! assert!(fs.exists("internal/smarterr.hcl"));
//!
//! let mut diags = Diagnostics::new();
//! diags.add_error("creating bucket".into(), "access denied".into());
//! assert_eq!(diags.len(), 1);
//! ```

pub mod error_sink;
pub mod filesystem;
pub mod log_sink;
pub mod named;

pub use error_sink::ErrorSink;
pub use filesystem::{DirFs, FileSystem, MemFs, WalkEntry};
pub use log_sink::{LogFields, LogLevel, LogSink, StderrLogSink, TracingLogSink};
pub use named::NamedBlock;
