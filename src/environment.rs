//! Injected configuration of the formatter.
//!
//! An [`Environment`] bundles what the process-wide functions in
//! [`global`](crate::global) configure: the config filesystem and its base
//! directory, the log sink and the debug output. It is cheap to clone;
//! clones share the effective-config cache.
//!
//! # Examples
//!
//! ```
//! use smarterr::traits::MemFs;
//! use smarterr::{Context, Environment};
//!
//! let fs = MemFs::new().with_file(
//!     "internal/smarterr/smarterr.hcl",
//!     r#"template "error_summary" { format = "request failed" }"#,
//! );
//! let env = Environment::new().with_filesystem(fs, "internal");
//!
//! let err = std::io::Error::other("connection reset");
//! let diags = env.append_error(&Context::new(), Vec::new(), &err, &[]);
//! assert_eq!(diags[0].summary, "request failed");
//! assert_eq!(diags[0].detail, "connection reset");
//! ```

use crate::config::{ConfigIndex, EffectiveConfig};
use crate::debug::DebugOutput;
use crate::error::SmarterrResult;
use crate::traits::filesystem::normalize;
use crate::traits::{FileSystem, LogSink, TracingLogSink};
use std::collections::VecDeque;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Number of effective configs kept per environment.
pub const CONFIG_CACHE_CAPACITY: usize = 64;

type CacheKey = (String, Vec<String>);

/// Least-recently-used cache of merged configs, keyed by the base directory
/// and the set of contributing files.
#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: Mutex<VecDeque<(CacheKey, Arc<EffectiveConfig>)>>,
}

impl ConfigCache {
    fn key(base_dir: &str, sources: &[String]) -> CacheKey {
        let mut paths = sources.to_vec();
        paths.sort();
        (base_dir.to_string(), paths)
    }

    pub fn get(&self, base_dir: &str, sources: &[String]) -> Option<Arc<EffectiveConfig>> {
        let key = Self::key(base_dir, sources);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let position = entries.iter().position(|(k, _)| *k == key)?;
        let entry = entries.remove(position)?;
        let config = Arc::clone(&entry.1);
        entries.push_front(entry);
        Some(config)
    }

    pub fn insert(&self, base_dir: &str, config: Arc<EffectiveConfig>) {
        let key = Self::key(base_dir, &config.sources);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|(k, _)| *k != key);
        entries.push_front((key, config));
        entries.truncate(CONFIG_CACHE_CAPACITY);
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
pub struct Environment {
    filesystem: Option<Arc<dyn FileSystem>>,
    base_dir: String,
    log_sink: Arc<dyn LogSink>,
    debug: DebugOutput,
    cache: Arc<ConfigCache>,
}

impl Environment {
    /// An environment with no filesystem; entry points report an
    /// initialization fallback until one is set.
    pub fn new() -> Self {
        Self {
            filesystem: None,
            base_dir: String::new(),
            log_sink: Arc::new(TracingLogSink),
            debug: DebugOutput::new(),
            cache: Arc::new(ConfigCache::default()),
        }
    }

    pub fn with_filesystem(
        mut self,
        fs: impl FileSystem + 'static,
        base_dir: impl Into<String>,
    ) -> Self {
        self.set_filesystem(Arc::new(fs), base_dir);
        self
    }

    pub fn with_log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.log_sink = Arc::new(sink);
        self
    }

    pub fn with_debug(mut self, forced: bool) -> Self {
        self.debug.set_forced(forced);
        self
    }

    pub fn with_debug_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.debug.set_writer(writer);
        self
    }

    /// Replaces the filesystem and drops every cached config.
    pub fn set_filesystem(&mut self, fs: Arc<dyn FileSystem>, base_dir: impl Into<String>) {
        self.filesystem = Some(fs);
        self.base_dir = normalize(&base_dir.into());
        self.cache = Arc::new(ConfigCache::default());
    }

    pub fn set_log_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.log_sink = sink;
    }

    pub fn debug_output_mut(&mut self) -> &mut DebugOutput {
        &mut self.debug
    }

    pub fn filesystem(&self) -> Option<&Arc<dyn FileSystem>> {
        self.filesystem.as_ref()
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn log_sink(&self) -> &dyn LogSink {
        self.log_sink.as_ref()
    }

    pub fn debug_output(&self) -> &DebugOutput {
        &self.debug
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    /// Loads (or reuses) the merged config for a call site with the given
    /// stack paths.
    pub(crate) fn effective_config(
        &self,
        fs: &dyn FileSystem,
        stack_paths: &[String],
    ) -> SmarterrResult<Arc<EffectiveConfig>> {
        let index = ConfigIndex::scan(fs, &self.base_dir)?;
        let sources = index.applicable(stack_paths);
        if let Some(hit) = self.cache.get(&self.base_dir, &sources) {
            return Ok(hit);
        }
        let effective = Arc::new(EffectiveConfig::load(fs, sources)?);
        self.cache.insert(&self.base_dir, Arc::clone(&effective));
        Ok(effective)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("filesystem", &self.filesystem)
            .field("base_dir", &self.base_dir)
            .field("debug", &self.debug)
            .field("cached_configs", &self.cache.len())
            .finish_non_exhaustive()
    }
}
