//! `[smarterr debug]` line tracer.
//!
//! Tracing is off unless debug was forced on the environment or the
//! effective config sets `debug = true`. Every line carries the call's
//! correlation id. The same messages also go to `tracing` at debug level.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

pub const DEBUG_PREFIX: &str = "[smarterr debug]";

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Where debug lines go and whether they are forced on.
#[derive(Clone)]
pub struct DebugOutput {
    forced: bool,
    writer: SharedWriter,
}

impl DebugOutput {
    pub fn new() -> Self {
        Self {
            forced: false,
            writer: Arc::new(Mutex::new(Box::new(std::io::stderr()))),
        }
    }

    pub fn forced(&self) -> bool {
        self.forced
    }

    pub fn set_forced(&mut self, forced: bool) {
        self.forced = forced;
    }

    pub fn set_writer(&mut self, writer: impl Write + Send + 'static) {
        self.writer = Arc::new(Mutex::new(Box::new(writer)));
    }

    /// A tracer for one call.
    pub fn trace(&self, correlation_id: impl Into<String>) -> DebugTrace {
        DebugTrace {
            enabled: self.forced,
            correlation_id: correlation_id.into(),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl Default for DebugOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DebugOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugOutput")
            .field("forced", &self.forced)
            .finish_non_exhaustive()
    }
}

/// Per-call tracer.
#[derive(Clone)]
pub struct DebugTrace {
    enabled: bool,
    correlation_id: String,
    writer: SharedWriter,
}

impl DebugTrace {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns tracing on, e.g. once the effective config asked for it.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn log(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(correlation_id = %self.correlation_id, "{args}");
        if !self.enabled {
            return;
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{DEBUG_PREFIX} [{}] {args}", self.correlation_id);
    }
}

impl fmt::Debug for DebugTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugTrace")
            .field("enabled", &self.enabled)
            .field("correlation_id", &self.correlation_id)
            .finish_non_exhaustive()
    }
}
