use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::VfsError;
use crate::provider::SourceProvider;

/// In-memory source provider for tests and embedded shader libraries.
///
/// Thread-safe and mutable even after being mounted in a [`Vfs`](crate::Vfs).
/// Cloning shares the same underlying storage.
///
/// Directories are implicit: they exist whenever a file path contains
/// that directory prefix.
///
/// # Example
///
/// ```ignore
/// let mem = MemoryProvider::new()
///     .with_file("Gravity.glsl", "--Vertex\nvoid main(){}\n")
///     .with_file("Common.glsl", "--Utils\nfloat util(){return 1.0;}\n");
///
/// let text = mem.read_to_string("Gravity.glsl")?;
/// ```
#[derive(Clone, Default)]
pub struct MemoryProvider {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryProvider {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_file(self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Insert a file at the given path.
    ///
    /// The path should use forward slashes and have no leading slash.
    /// Overwrites any existing file at the same path.
    pub fn insert(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), data.into());
    }

    /// Remove a file at the given path, returning its data if it existed.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SourceProvider for MemoryProvider {
    fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        let map = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let bytes = map
            .get(path)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))?;
        String::from_utf8(bytes).map_err(|_| VfsError::InvalidUtf8(path.to_owned()))
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        let map = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(map.contains_key(path))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let map = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let mut children = HashSet::new();

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        for key in map.keys() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                // Immediate child name only
                let child = match rest.find('/') {
                    Some(pos) => &rest[..pos],
                    None => rest,
                };
                if !child.is_empty() {
                    children.insert(child.to_owned());
                }
            }
        }

        let mut result: Vec<String> = children.into_iter().collect();
        result.sort();
        Ok(result)
    }
}
