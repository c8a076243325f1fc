use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Maps the resource identifiers found in a scene description to bytes.
pub trait ResourceResolver: Send + Sync {
    /// Read the whole resource.
    fn resolve(&self, id: &str) -> AudiogramResult<Vec<u8>>;

    /// Filesystem location of the resource, for consumers that need a path (video decoding).
    fn local_path(&self, _id: &str) -> Option<PathBuf> {
        None
    }
}

/// Resolves identifiers as relative paths under a root directory.
#[derive(Clone, Debug)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &str) -> AudiogramResult<PathBuf> {
        Ok(self.root.join(normalize_rel_path(id)?))
    }
}

impl ResourceResolver for FsResolver {
    fn resolve(&self, id: &str) -> AudiogramResult<Vec<u8>> {
        let path = self.path_for(id)?;
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read resource '{}'", path.display()))
            .map_err(|e| AudiogramError::resource(format!("{e:#}")))?;
        Ok(bytes)
    }

    fn local_path(&self, id: &str) -> Option<PathBuf> {
        self.path_for(id).ok()
    }
}

/// In-memory resources keyed by normalized identifier.
#[derive(Clone, Debug, Default)]
pub struct MemoryResolver {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `id`.
    pub fn insert(&mut self, id: &str, bytes: impl Into<Vec<u8>>) -> AudiogramResult<()> {
        self.entries.insert(normalize_rel_path(id)?, bytes.into());
        Ok(())
    }

    /// Builder-style [`MemoryResolver::insert`].
    pub fn with(mut self, id: &str, bytes: impl Into<Vec<u8>>) -> AudiogramResult<Self> {
        self.insert(id, bytes)?;
        Ok(self)
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, id: &str) -> AudiogramResult<Vec<u8>> {
        let key = normalize_rel_path(id)?;
        self.entries
            .get(&key)
            .cloned()
            .ok_or_else(|| AudiogramError::resource(format!("unknown resource '{key}'")))
    }
}

/// Normalize a resource identifier into a relative `/`-separated path.
///
/// Removes `.` segments and rejects absolute paths and parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> AudiogramResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(AudiogramError::resource(format!(
            "resource paths must be relative, got '{source}'"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(AudiogramError::resource(format!(
                "resource paths must not contain '..', got '{source}'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(AudiogramError::resource(
            "resource path must contain a file name",
        ));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
