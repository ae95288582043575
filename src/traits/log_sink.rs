//! User-facing log sink for the `log_error`/`log_warn`/`log_info` templates.

use crate::context::Context;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use strum::{AsRefStr, Display};

/// Key/value fields attached to a log event.
pub type LogFields = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Receives rendered log templates after the host diagnostic was appended.
pub trait LogSink: Send + Sync {
    fn debug(&self, ctx: &Context, msg: &str, fields: &LogFields);
    fn info(&self, ctx: &Context, msg: &str, fields: &LogFields);
    fn warn(&self, ctx: &Context, msg: &str, fields: &LogFields);
    fn error(&self, ctx: &Context, msg: &str, fields: &LogFields);

    /// Dispatches on `level`.
    fn log(&self, level: LogLevel, ctx: &Context, msg: &str, fields: &LogFields) {
        match level {
            LogLevel::Debug => self.debug(ctx, msg, fields),
            LogLevel::Info => self.info(ctx, msg, fields),
            LogLevel::Warn => self.warn(ctx, msg, fields),
            LogLevel::Error => self.error(ctx, msg, fields),
        }
    }
}

/// Forwards events to the `tracing` subscriber installed by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn debug(&self, ctx: &Context, msg: &str, fields: &LogFields) {
        tracing::debug!(correlation_id = ctx.correlation_id(), ?fields, "{msg}");
    }

    fn info(&self, ctx: &Context, msg: &str, fields: &LogFields) {
        tracing::info!(correlation_id = ctx.correlation_id(), ?fields, "{msg}");
    }

    fn warn(&self, ctx: &Context, msg: &str, fields: &LogFields) {
        tracing::warn!(correlation_id = ctx.correlation_id(), ?fields, "{msg}");
    }

    fn error(&self, ctx: &Context, msg: &str, fields: &LogFields) {
        tracing::error!(correlation_id = ctx.correlation_id(), ?fields, "{msg}");
    }
}

/// Prints `LEVEL message key=value ...` lines, to standard error by default.
pub struct StderrLogSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StderrLogSink {
    pub fn new() -> Self {
        Self::with_writer(std::io::stderr())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn print(&self, level: LogLevel, msg: &str, fields: &LogFields) {
        let mut line = format!("{level} {msg}");
        for (key, value) in fields {
            line.push_str(&format!(" {key}={value:?}"));
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // a failing log writer must not disturb error reporting
        let _ = writeln!(writer, "{line}");
    }
}

impl Default for StderrLogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StderrLogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StderrLogSink").finish_non_exhaustive()
    }
}

impl LogSink for StderrLogSink {
    fn debug(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.print(LogLevel::Debug, msg, fields);
    }

    fn info(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.print(LogLevel::Info, msg, fields);
    }

    fn warn(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.print(LogLevel::Warn, msg, fields);
    }

    fn error(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.print(LogLevel::Error, msg, fields);
    }
}
