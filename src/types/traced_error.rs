//! Error wrapper that remembers where it was created.
//!
//! Tokens with `source = "error_stack"` match against the frames captured
//! here rather than the live stack of the reporting call.
//!
//! # Examples
//!
//! ```
//! use smarterr::types::{CallFrame, TracedError};
//!
//! let err = TracedError::with_frames(
//!     "throttled",
//!     vec![CallFrame::new("app::service::resource_bucket_read", "internal/service/s3/bucket.rs")],
//! );
//! assert_eq!(err.to_string(), "throttled");
//! assert_eq!(err.frames().len(), 1);
//! ```

use crate::stack;
use crate::types::{CallFrame, CallStack};
use std::error::Error as StdError;
use std::fmt;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An error that carries its original cause and the call stack captured at
/// construction time. Display is the cause's display, unchanged.
pub struct TracedError {
    cause: BoxError,
    frames: CallStack,
}

impl TracedError {
    /// Wraps `cause`, capturing the current call stack.
    pub fn new(cause: impl Into<BoxError>) -> Self {
        Self {
            cause: cause.into(),
            frames: stack::capture(),
        }
    }

    /// Wraps `cause` with an explicit frame list.
    pub fn with_frames(cause: impl Into<BoxError>, frames: CallStack) -> Self {
        Self {
            cause: cause.into(),
            frames,
        }
    }

    #[inline]
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    #[inline]
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    #[inline]
    pub fn into_cause(self) -> BoxError {
        self.cause
    }

    /// Finds the first `TracedError` in `err`'s source chain, `err` included.
    pub fn find<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a TracedError> {
        let mut current = Some(err);
        while let Some(e) = current {
            if let Some(traced) = e.downcast_ref::<TracedError>() {
                return Some(traced);
            }
            current = e.source();
        }
        None
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl fmt::Debug for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedError")
            .field("cause", &self.cause)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl StdError for TracedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}
