//! Configuration files: loading, discovery, merging, printing and checking.
//!
//! A call site is governed by the global config plus every `smarterr.hcl`
//! found in an ancestor directory of one of its stack paths. Those files are
//! merged least specific first into an [`EffectiveConfig`].
//!
//! # Examples
//!
//! ```
//! use smarterr::config::effective_config_at;
//! use smarterr::traits::MemFs;
//!
//! let fs = MemFs::new()
//!     .with_file("internal/service/smarterr.hcl", r#"parameter "service" { value = "Default" }"#)
//!     .with_file(
//!         "internal/service/logs/smarterr.hcl",
//!         r#"parameter "service" { value = "CloudWatch" }"#,
//!     );
//!
//! let effective = effective_config_at(&fs, "internal", "service/logs").unwrap();
//! assert_eq!(effective.config.parameter("service").unwrap().value, "CloudWatch");
//! assert_eq!(effective.sources.len(), 2);
//! ```

pub mod discovery;
pub mod emit;
pub mod loader;
pub mod merge;
pub mod validate;

pub use discovery::{sort_by_depth, ConfigIndex, CONFIG_FILENAME, GLOBAL_DIR};
pub use loader::{load_config, load_file};
pub use merge::{merge, merge_named};
pub use validate::{validate, Issue, IssueLevel, ValidationReport};

use crate::error::SmarterrResult;
use crate::traits::filesystem::normalize;
use crate::traits::FileSystem;
use crate::types::Config;

/// The merged config for one call site and the files it came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EffectiveConfig {
    pub config: Config,
    /// Contributing files, least specific first.
    pub sources: Vec<String>,
}

impl EffectiveConfig {
    /// Loads and merges `sources` in the given order.
    pub fn load(fs: &dyn FileSystem, sources: Vec<String>) -> SmarterrResult<Self> {
        let configs = sources
            .iter()
            .map(|path| load_file(fs, path))
            .collect::<SmarterrResult<Vec<_>>>()?;
        Ok(Self {
            config: merge(&configs),
            sources,
        })
    }
}

/// Computes the effective config for a directory below `base_dir`, as if a
/// call site lived in `start_dir`.
pub fn effective_config_at(
    fs: &dyn FileSystem,
    base_dir: &str,
    start_dir: &str,
) -> SmarterrResult<EffectiveConfig> {
    let index = ConfigIndex::scan(fs, base_dir)?;
    let start_dir = normalize(start_dir);
    let synthetic = format!("{}/", discovery::join(index.base_dir(), &start_dir));
    EffectiveConfig::load(fs, index.applicable(&[synthetic]))
}
