//! Config-driven error summaries, details and log events.
//!
//! `smarterr` turns an error (or an incoming diagnostic) into a
//! host-facing diagnostic whose summary and detail are rendered from
//! templates. Templates reference tokens, and tokens are resolved per call
//! from config parameters, caller arguments, the ambient context, the call
//! stack, the error itself and matching hints. Which `smarterr.hcl` files
//! apply is decided by where the call comes from: the global config plus
//! every config in an ancestor directory of the calling code.
//!
//! Failures inside the formatter never hide the original error: it falls
//! back to the error text and appends a bracketed `[smarterr ...]` note.
//!
//! # Examples
//!
//! ## Rendering with an injected environment
//!
//! ```
//! use smarterr::traits::MemFs;
//! use smarterr::{kv, CallFrame, Context, Environment};
//!
//! let fs = MemFs::new()
//!     .with_file(
//!         "internal/service/smarterr.hcl",
//!         r#"
//!         parameter "service" {
//!           value = "Default"
//!         }
//!         token "service" {
//!           source    = "parameter"
//!           parameter = "service"
//!         }
//!         token "id" {
//!           arg = "id"
//!         }
//!         template "error_summary" {
//!           format = "creating {{.service}} ({{.id}})"
//!         }
//!         "#,
//!     )
//!     .with_file(
//!         "internal/service/logs/smarterr.hcl",
//!         r#"parameter "service" { value = "CloudWatch" }"#,
//!     );
//! let env = Environment::new().with_filesystem(fs, "internal");
//!
//! // explicit frames stand in for the captured call stack
//! let ctx = Context::new().with_frames(vec![CallFrame::new(
//!     "provider::logs::resource_group_create",
//!     "/src/provider/internal/service/logs/group.rs",
//! )]);
//! let err = std::io::Error::other("access denied");
//! let diags = env.append_error(&ctx, Vec::new(), &err, &kv!["id", "lg-1"]);
//!
//! assert_eq!(diags[0].summary, "creating CloudWatch (lg-1)");
//! assert_eq!(diags[0].detail, "access denied");
//! ```
//!
//! ## Checking a config
//!
//! ```
//! use smarterr::config::{load_config, validate};
//!
//! let source = br#"token "t" { stack_matches = ["missing"] }"#;
//! let config = load_config(source, "smarterr.hcl").unwrap();
//! let report = validate(&config);
//! assert!(report.has_errors());
//! ```

/// Entry points: append, add and enrich
pub mod api;
/// Loading, discovering, merging, printing and validating configs
pub mod config;
/// Ambient per-call context
pub mod context;
/// `[smarterr debug]` tracing
pub mod debug;
/// Injectable environment and config cache
pub mod environment;
/// Internal error kinds
pub mod error;
/// Process-wide environment and correlation ids
pub mod global;
/// Argument-building macros
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Token resolution, stack matching, hints and transforms
pub mod resolve;
/// Per-call runtime envelope
pub mod runtime;
/// Call-stack capture
pub mod stack;
/// Template parsing and rendering
pub mod template;
/// Fault injection for tests
pub mod testing;
/// Host seams: filesystem, log sink, error sink
pub mod traits;
/// Config model, diagnostics, arguments and token values
pub mod types;

pub use api::{add_error, append_error, enrich_append};
pub use context::Context;
pub use environment::Environment;
pub use error::{SmarterrError, SmarterrResult};
pub use global::{enable_debug, reset, set_debug_writer, set_filesystem, set_log_sink};
pub use traits::*;
pub use types::{CallFrame, Config, Diagnostic, Diagnostics, Severity, TracedError, Value};
