//! Process-wide configuration.
//!
//! The free-function entry points read a snapshot of one shared
//! [`Environment`] on entry. Set the filesystem once at start-up; later
//! changes are allowed but do not affect calls already in flight.

use crate::environment::Environment;
use crate::traits::{FileSystem, LogSink};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static GLOBAL: LazyLock<RwLock<Environment>> = LazyLock::new(|| RwLock::new(Environment::new()));

static CORRELATION: AtomicU64 = AtomicU64::new(0);

fn update(f: impl FnOnce(&mut Environment)) {
    let mut env = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut env);
}

/// A snapshot of the process-wide environment.
pub fn environment() -> Environment {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Sets the filesystem that holds `smarterr.hcl` files and the base
/// directory call-site paths are resolved against.
pub fn set_filesystem(fs: impl FileSystem + 'static, base_dir: impl Into<String>) {
    let fs: Arc<dyn FileSystem> = Arc::new(fs);
    update(|env| env.set_filesystem(fs, base_dir));
}

pub fn set_log_sink(sink: impl LogSink + 'static) {
    let sink: Arc<dyn LogSink> = Arc::new(sink);
    update(|env| env.set_log_sink(sink));
}

/// Forces debug tracing on regardless of config.
pub fn enable_debug() {
    update(|env| env.debug_output_mut().set_forced(true));
}

pub fn set_debug_writer(writer: impl Write + Send + 'static) {
    update(|env| env.debug_output_mut().set_writer(writer));
}

/// Restores the unconfigured state.
pub fn reset() {
    update(|env| *env = Environment::new());
}

/// Next value of the process-wide correlation counter.
pub fn next_correlation_id() -> String {
    (CORRELATION.fetch_add(1, Ordering::Relaxed) + 1).to_string()
}
