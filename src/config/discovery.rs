//! Finds the configuration files that govern a call site.
//!
//! Every file named [`CONFIG_FILENAME`] below the base directory is indexed.
//! The file at `<base>/smarterr/smarterr.hcl` is the global config and always
//! applies; any other file applies when its directory is an ancestor of one of
//! the call site's stack paths.

use crate::error::{SmarterrError, SmarterrResult};
use crate::traits::filesystem::normalize;
use crate::traits::FileSystem;
use std::io;

/// Well-known basename of configuration files.
pub const CONFIG_FILENAME: &str = "smarterr.hcl";

/// Directory (relative to the base) that holds the global config.
pub const GLOBAL_DIR: &str = "smarterr";

/// All configuration files found below one base directory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigIndex {
    base_dir: String,
    global: Option<String>,
    candidates: Vec<String>,
}

impl ConfigIndex {
    /// Walks `base_dir` in `fs` and indexes every config file.
    ///
    /// A base directory that does not exist yields an empty index.
    pub fn scan(fs: &dyn FileSystem, base_dir: &str) -> SmarterrResult<Self> {
        let base_dir = normalize(base_dir);
        let entries = match fs.walk(&base_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(SmarterrError::config_load(&base_dir, err)),
        };
        let global_path = join(&base_dir, &format!("{GLOBAL_DIR}/{CONFIG_FILENAME}"));
        let mut index = Self {
            base_dir,
            global: None,
            candidates: Vec::new(),
        };
        for entry in entries.iter().filter(|e| !e.is_dir && e.basename() == CONFIG_FILENAME) {
            if entry.path == global_path {
                index.global = Some(entry.path.clone());
            } else {
                index.candidates.push(entry.path.clone());
            }
        }
        index.candidates.sort();
        Ok(index)
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn global(&self) -> Option<&str> {
        self.global.as_deref()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Returns the files that apply to a call site with the given stack
    /// paths, least specific first: the global config, then the matching
    /// candidates shallowest first with ties broken lexicographically.
    pub fn applicable(&self, stack_paths: &[String]) -> Vec<String> {
        let mut matched: Vec<String> = self
            .candidates
            .iter()
            .filter(|path| {
                let needle = self.needle(path);
                stack_paths
                    .iter()
                    .any(|stack_path| stack_path.contains(&needle))
            })
            .cloned()
            .collect();
        sort_by_depth(&mut matched);
        self.global.iter().cloned().chain(matched).collect()
    }

    /// `<base>/<D>/` for a candidate living in directory `<base>/<D>`.
    fn needle(&self, path: &str) -> String {
        match path.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/"),
            // a file at the filesystem root governs every call site
            None => String::new(),
        }
    }
}

/// Orders paths by component count, then lexicographically.
pub fn sort_by_depth(paths: &mut [String]) {
    paths.sort_by(|a, b| depth(a).cmp(&depth(b)).then_with(|| a.cmp(b)));
}

fn depth(path: &str) -> usize {
    path.split('/').filter(|part| !part.is_empty()).count()
}

pub(crate) fn join(base: &str, rel: &str) -> String {
    match (base.is_empty(), rel.is_empty()) {
        (true, _) => rel.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{rel}"),
    }
}
