use std::path::PathBuf;

use crate::error::VfsError;
use crate::provider::SourceProvider;

/// File system provider for reading shader sources from disk.
///
/// The root path is joined with the provider path to form the actual
/// filesystem path. All I/O is blocking (`std::fs`).
///
/// Path traversal is prevented by path normalization which rejects
/// `..` segments before they reach the provider.
///
/// # Example
///
/// ```ignore
/// let provider = FileSystemProvider::new("./assets/shaders");
///
/// // Reads ./assets/shaders/Gravity.glsl
/// let text = provider.read_to_string("Gravity.glsl")?;
/// ```
pub struct FileSystemProvider {
    root: PathBuf,
}

impl FileSystemProvider {
    /// Create a provider rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it will be checked
    /// at read time.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this provider.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl SourceProvider for FileSystemProvider {
    fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        let full_path = self.resolve(path);
        log::trace!("reading {}", full_path.display());
        match std::fs::read_to_string(&full_path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(VfsError::NotFound(full_path.display().to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                Err(VfsError::InvalidUtf8(full_path.display().to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        Ok(self.resolve(path).is_file())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let full_path = self.resolve(path);
        if !full_path.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(full_path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_owned());
            }
        }
        entries.sort();
        Ok(entries)
    }
}
