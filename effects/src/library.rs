//! Built-in effect library.
//!
//! The library files are stored as multi-effect `.glsl` files in
//! `shaders/library/` and embedded at compile time:
//!
//! | File | Effects |
//! |------|---------|
//! | `Common.glsl` | `Math`, `Color`, `FullscreenVertex` |
//! | `Lighting.glsl` | `Lambert`, `BlinnPhong` |
//!
//! Every library effect includes what it uses, so each one resolves to a
//! complete snippet on its own. Pull in at most one effect that includes
//! `builtin/Common.Math` per shader stage.
//!
//! Library effects include each other as `builtin/Common.Math`, so the
//! provider must be mounted under [`BUILTIN_SOURCE`] in a
//! [`Vfs`](shaderfx_vfs::Vfs):
//!
//! ```ignore
//! let mut vfs = Vfs::new();
//! vfs.mount("shaders", FileSystemProvider::new("./shaders"));
//! vfs.mount(BUILTIN_SOURCE, EffectLibrary::standard().into_provider());
//! vfs.set_default("shaders");
//!
//! // Gravity.glsl may now contain `#include builtin/Lighting.Lambert`,
//! // also when keys are resolved under a base directory
//! let source = preprocessor.resolve("Gravity.Fragment", "fx", &vfs)?;
//! ```

use shaderfx_vfs::MemoryProvider;

/// Mount name expected by the library's own includes.
pub const BUILTIN_SOURCE: &str = "builtin";

/// Shared math, color and fullscreen helpers.
const COMMON_FILE: &str = include_str!("../shaders/library/Common.glsl");

/// Analytic lighting models.
const LIGHTING_FILE: &str = include_str!("../shaders/library/Lighting.glsl");

/// Collection of effect files that can be mounted as a source.
pub struct EffectLibrary {
    files: Vec<(&'static str, &'static str)>,
}

impl EffectLibrary {
    /// Create the standard library (`Common.glsl`, `Lighting.glsl`).
    pub fn standard() -> Self {
        Self {
            files: vec![("Common.glsl", COMMON_FILE), ("Lighting.glsl", LIGHTING_FILE)],
        }
    }

    /// Create an empty library.
    pub fn empty() -> Self {
        Self { files: Vec::new() }
    }

    /// Iterate over all files (path, source).
    pub fn files(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.files.iter().copied()
    }

    /// Add a custom file to the library.
    pub fn with_file(mut self, path: &'static str, source: &'static str) -> Self {
        self.files.push((path, source));
        self
    }

    /// Copy the library into an in-memory provider.
    pub fn into_provider(self) -> MemoryProvider {
        let provider = MemoryProvider::new();
        for (path, source) in self.files {
            provider.insert(path, source);
        }
        provider
    }
}
