//! Multi-effect shader source preprocessor.
//!
//! A shader source file holds several named *effects*. Each effect starts at
//! a marker line (`--Name`) and runs until the next marker. Effects are
//! addressed by key, `<file prefix>.<effect name>`, and may pull in other
//! effects, from the same file or another one, with `#include <key>`.
//!
//! # Overview
//!
//! - [`EffectPreprocessor`] - Resolves an effect key to include-free source
//! - [`PreprocessorConfig`] - Tokens, extension and line directive mode
//! - [`EffectLibrary`] - Built-in effect files to mount next to user files
//! - [`ProgramSources`] - Per-stage sources of a program (`Gravity.Vertex`, ...)
//!
//! # Example
//!
//! ```ignore
//! use shaderfx_effects::EffectPreprocessor;
//! use shaderfx_vfs::FileSystemProvider;
//!
//! // shaders/Gravity.glsl:
//! //   --Vertex
//! //   void main(){}
//! //   --Fragment
//! //   #include Common.Utils
//! //   void main(){}
//! let provider = FileSystemProvider::new("./shaders");
//! let source = EffectPreprocessor::default().resolve("Gravity.Fragment", "", &provider)?;
//! ```
//!
//! # Line Directives
//!
//! Each expanded include is followed by `#line <line> <file>` so that
//! compiler diagnostics after it point back into the including file.
//! [`LineDirectives::Bracket`] also marks the start of the included text.
//! File numbers index [`ResolvedEffect::files`]; the requested file is
//! always 0.

mod config;
mod error;
mod key;
pub mod library;
mod preprocessor;
mod program;
mod scanner;

pub use config::{LineDirectives, PreprocessorConfig};
pub use error::{ErrorKind, PreprocessError};
pub use key::EffectKey;
pub use library::{BUILTIN_SOURCE, EffectLibrary};
pub use preprocessor::{EffectPreprocessor, ResolvedEffect};
pub use program::{ProgramSources, ShaderStage};

use shaderfx_vfs::SourceProvider;

/// Effects library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolve `effect_key` with the default configuration.
///
/// Shorthand for `EffectPreprocessor::default().resolve(...)`.
pub fn resolve<P>(
    effect_key: &str,
    base_directory: &str,
    provider: &P,
) -> Result<String, PreprocessError>
where
    P: SourceProvider + ?Sized,
{
    EffectPreprocessor::default().resolve(effect_key, base_directory, provider)
}
