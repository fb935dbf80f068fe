use std::sync::Arc;

use crate::VfsError;

/// Trait for shader source backends.
///
/// Providers load the full text of a file given a path. Reads are blocking
/// and complete before returning; the preprocessor calls them from a single
/// thread per resolution, but a provider may be shared across threads.
///
/// # Path Contract
///
/// Paths passed to provider methods are already normalized: forward slashes,
/// no leading/trailing slashes, no `..` or `.` segments. The path is relative
/// to the provider's root.
pub trait SourceProvider: Send + Sync {
    /// Read the entire contents of a file as UTF-8 text.
    fn read_to_string(&self, path: &str) -> Result<String, VfsError>;

    /// Check whether a file exists at the given path.
    fn exists(&self, path: &str) -> Result<bool, VfsError>;

    /// List the immediate children of a directory.
    ///
    /// Returns file and directory names (not full paths), sorted.
    /// Returns an empty vec for non-existent directories.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError>;

    /// Whether `name` is a top-level source of this provider, such as a
    /// [`Vfs`](crate::Vfs) mount.
    ///
    /// Paths starting with a mount point are absolute: callers must not
    /// prefix them with a base directory.
    fn is_mount_point(&self, _name: &str) -> bool {
        false
    }
}

impl<P: SourceProvider + ?Sized> SourceProvider for &P {
    fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        (**self).read_to_string(path)
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        (**self).exists(path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        (**self).list_dir(path)
    }

    fn is_mount_point(&self, name: &str) -> bool {
        (**self).is_mount_point(name)
    }
}

impl<P: SourceProvider + ?Sized> SourceProvider for Arc<P> {
    fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        (**self).read_to_string(path)
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        (**self).exists(path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        (**self).list_dir(path)
    }

    fn is_mount_point(&self, name: &str) -> bool {
        (**self).is_mount_point(name)
    }
}

/// Adapts a plain read function into a [`SourceProvider`].
///
/// Useful for tests and for callers that already own a loader closure.
///
/// ```ignore
/// let provider = FnProvider::new(|path: &str| std::fs::read_to_string(path).map_err(Into::into));
/// ```
pub struct FnProvider<F> {
    read: F,
}

impl<F> FnProvider<F>
where
    F: Fn(&str) -> Result<String, VfsError> + Send + Sync,
{
    pub fn new(read: F) -> Self {
        Self { read }
    }
}

impl<F> SourceProvider for FnProvider<F>
where
    F: Fn(&str) -> Result<String, VfsError> + Send + Sync,
{
    fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        (self.read)(path)
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        match (self.read)(path) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn list_dir(&self, _path: &str) -> Result<Vec<String>, VfsError> {
        Ok(Vec::new())
    }
}
