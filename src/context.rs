//! Ambient per-call context.
//!
//! A [`Context`] carries the values `context`-sourced tokens read, an
//! optional correlation id reused across nested calls, and optionally an
//! explicit frame list that replaces live stack capture.
//!
//! # Examples
//!
//! ```
//! use smarterr::{CallFrame, Context};
//!
//! let ctx = Context::new()
//!     .with_value("region", "eu-west-1")
//!     .with_frames(vec![CallFrame::new(
//!         "resource_bucket_create",
//!         "internal/service/s3/bucket.rs",
//!     )]);
//!
//! assert_eq!(ctx.value("region").map(ToString::to_string).as_deref(), Some("eu-west-1"));
//! assert!(ctx.correlation_id().is_none());
//! ```

use crate::types::{CallFrame, CallStack, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: BTreeMap<String, Value>,
    correlation_id: Option<String>,
    frames: Option<CallStack>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`; a stored `Null` counts as absent.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Uses `frames` (innermost first) instead of capturing the live stack.
    pub fn with_frames(mut self, frames: CallStack) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn frames(&self) -> Option<&[CallFrame]> {
        self.frames.as_deref()
    }
}
