use smarterr::context::Context;
use smarterr::debug::DebugOutput;
use smarterr::runtime::RuntimeEnvelope;
use smarterr::traits::{LogFields, LogLevel, LogSink};
use smarterr::types::{CallFrame, Config};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared in-memory writer for debug and log output.
#[derive(Clone, Default)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Log sink that records every event.
#[derive(Clone, Default)]
pub struct RecordingSink(pub Arc<Mutex<Vec<(LogLevel, String, LogFields)>>>);

impl RecordingSink {
    pub fn events(&self) -> Vec<(LogLevel, String, LogFields)> {
        self.0.lock().unwrap().clone()
    }

    fn record(&self, level: LogLevel, msg: &str, fields: &LogFields) {
        self.0.lock().unwrap().push((level, msg.to_string(), fields.clone()));
    }
}

impl LogSink for RecordingSink {
    fn debug(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.record(LogLevel::Debug, msg, fields);
    }

    fn info(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.record(LogLevel::Info, msg, fields);
    }

    fn warn(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.record(LogLevel::Warn, msg, fields);
    }

    fn error(&self, _ctx: &Context, msg: &str, fields: &LogFields) {
        self.record(LogLevel::Error, msg, fields);
    }
}

/// A context whose call stack is a single frame in `file`.
pub fn called_from(function: &str, file: &str) -> Context {
    Context::new().with_frames(vec![CallFrame::new(function, file)])
}

pub fn envelope<'a>(config: &'a Config, context: &'a Context) -> RuntimeEnvelope<'a> {
    RuntimeEnvelope::new(config, context, DebugOutput::new().trace("test"))
}
