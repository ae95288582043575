//! Read-only filesystem abstraction over the bundled configuration tree.
//!
//! Paths are logical, `/`-separated and relative to the filesystem root.
//! [`MemFs`] covers the common case of files embedded into the binary with
//! `include_str!`; [`DirFs`] serves an on-disk directory for developer tooling.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// One entry produced by [`FileSystem::walk`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WalkEntry {
    pub path: String,
    pub is_dir: bool,
}

impl WalkEntry {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }

    /// The final path component.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Minimal capability set the formatter needs from a filesystem.
pub trait FileSystem: Send + Sync + fmt::Debug {
    /// Reads the full contents of `path`.
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Lists every entry below `root`, recursively, in lexicographic order.
    /// An empty `root` walks the whole tree.
    fn walk(&self, root: &str) -> io::Result<Vec<WalkEntry>>;

    /// Returns true if `path` names a file or directory.
    fn exists(&self, path: &str) -> bool;
}

pub(crate) fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{path}: no such file or directory"),
    )
}

/// In-memory tree, typically populated from `include_str!`/`include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: &str, contents: impl AsRef<[u8]>) {
        self.files.insert(normalize(path), contents.as_ref().to_vec());
    }

    fn is_dir(&self, path: &str) -> bool {
        if path.is_empty() {
            return !self.files.is_empty();
        }
        let prefix = format!("{path}/");
        self.files.range(prefix.clone()..).next().is_some_and(|(p, _)| p.starts_with(&prefix))
    }
}

impl FileSystem for MemFs {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        let path = normalize(path);
        self.files.get(&path).cloned().ok_or_else(|| not_found(&path))
    }

    fn walk(&self, root: &str) -> io::Result<Vec<WalkEntry>> {
        let root = normalize(root);
        if !root.is_empty() && !self.is_dir(&root) {
            return Err(not_found(&root));
        }
        let prefix = if root.is_empty() { String::new() } else { format!("{root}/") };
        let mut entries = BTreeMap::new();
        for path in self.files.keys().filter(|p| p.starts_with(&prefix)) {
            let mut dir = String::from(root.as_str());
            let rel = &path[prefix.len()..];
            let mut parts = rel.split('/').peekable();
            while let Some(part) = parts.next() {
                if parts.peek().is_none() {
                    break;
                }
                if !dir.is_empty() {
                    dir.push('/');
                }
                dir.push_str(part);
                entries.entry(dir.clone()).or_insert(true);
            }
            entries.insert(path.clone(), false);
        }
        Ok(entries
            .into_iter()
            .map(|(path, is_dir)| WalkEntry { path, is_dir })
            .collect())
    }

    fn exists(&self, path: &str) -> bool {
        let path = normalize(path);
        self.files.contains_key(&path) || self.is_dir(&path)
    }
}

/// A directory on disk.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for part in normalize(path).split('/').filter(|p| !p.is_empty()) {
            full.push(part);
        }
        full
    }

    fn walk_into(&self, dir: &Path, logical: &str, out: &mut Vec<WalkEntry>) -> io::Result<()> {
        let mut children = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
        children.sort_by_key(|entry| entry.file_name());
        for child in children {
            let name = child.file_name().to_string_lossy().into_owned();
            let path = if logical.is_empty() { name } else { format!("{logical}/{name}") };
            if child.file_type()?.is_dir() {
                out.push(WalkEntry::dir(path.clone()));
                self.walk_into(&child.path(), &path, out)?;
            } else {
                out.push(WalkEntry::file(path));
            }
        }
        Ok(())
    }
}

impl FileSystem for DirFs {
    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }

    fn walk(&self, root: &str) -> io::Result<Vec<WalkEntry>> {
        let mut out = Vec::new();
        self.walk_into(&self.resolve(root), &normalize(root), &mut out)?;
        out.sort();
        Ok(out)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }
}
