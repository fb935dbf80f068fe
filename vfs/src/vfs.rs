use std::collections::HashMap;
use std::sync::Arc;

use crate::error::VfsError;
use crate::path;
use crate::provider::SourceProvider;

/// Source router that dispatches paths to mounted providers.
///
/// Paths are structured as `"source_name/rest/of/path"`. The first path
/// segment selects the provider. If no source name matches, the default
/// source (if set) is tried with the full path.
///
/// `Clone` is cheap (Arc internals). Thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// let mut vfs = Vfs::new();
/// vfs.mount("shaders", FileSystemProvider::new("./assets/shaders"));
/// vfs.mount("builtin", EffectLibrary::standard().into_provider());
/// vfs.set_default("shaders");
///
/// // Reads ./assets/shaders/Gravity.glsl through the default source
/// let text = vfs.read_to_string("Gravity.glsl")?;
///
/// // Reads the embedded library file
/// let text = vfs.read_to_string("builtin/Common.glsl")?;
/// ```
#[derive(Clone)]
pub struct Vfs {
    inner: Arc<VfsInner>,
}

struct VfsInner {
    sources: HashMap<String, Box<dyn SourceProvider>>,
    default_source: Option<String>,
}

impl Vfs {
    /// Create an empty VFS with no mounted sources.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VfsInner {
                sources: HashMap::new(),
                default_source: None,
            }),
        }
    }

    /// Mount a provider under the given source name.
    ///
    /// Replaces any previously mounted provider with the same name.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned. All mounting must
    /// happen during the configuration phase before sharing the `Vfs`.
    pub fn mount(&mut self, name: impl Into<String>, provider: impl SourceProvider + 'static) {
        let inner = Arc::get_mut(&mut self.inner).expect("cannot mount after Vfs has been cloned");
        let name = name.into();
        log::debug!("mounting source '{name}'");
        inner.sources.insert(name, Box::new(provider));
    }

    /// Set the default source name used when a path does not match any mount.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned.
    pub fn set_default(&mut self, name: impl Into<String>) {
        let inner =
            Arc::get_mut(&mut self.inner).expect("cannot set default after Vfs has been cloned");
        inner.default_source = Some(name.into());
    }

    /// Whether a source with the given name is mounted.
    pub fn is_mounted(&self, name: &str) -> bool {
        self.inner.sources.contains_key(name)
    }

    /// Resolve a raw path to a provider reference and the path within that provider.
    fn resolve(&self, raw_path: &str) -> Result<(&dyn SourceProvider, String), VfsError> {
        let normalized = path::normalize(raw_path)?;
        let (source, rest) = path::split_source(&normalized);

        if let Some(provider) = self.inner.sources.get(source) {
            return Ok((provider.as_ref(), rest.to_owned()));
        }

        if let Some(default_name) = &self.inner.default_source
            && let Some(provider) = self.inner.sources.get(default_name)
        {
            return Ok((provider.as_ref(), normalized));
        }

        Err(VfsError::NoSuchSource(source.to_owned()))
    }
}

impl SourceProvider for Vfs {
    /// Read a file. The first path segment selects the source provider;
    /// falls back to the default source if no mount matches.
    fn read_to_string(&self, raw_path: &str) -> Result<String, VfsError> {
        let (provider, resolved_path) = self.resolve(raw_path)?;
        provider.read_to_string(&resolved_path)
    }

    fn exists(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, resolved_path) = self.resolve(raw_path)?;
        provider.exists(&resolved_path)
    }

    fn list_dir(&self, raw_path: &str) -> Result<Vec<String>, VfsError> {
        let (provider, resolved_path) = self.resolve(raw_path)?;
        provider.list_dir(&resolved_path)
    }

    fn is_mount_point(&self, name: &str) -> bool {
        self.is_mounted(name)
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}
