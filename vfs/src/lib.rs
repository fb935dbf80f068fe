//! Shader source providers for the shaderfx preprocessor.
//!
//! Provides a unified, synchronous API for loading shader source text from
//! multiple storage backends through the [`SourceProvider`] trait and the
//! [`Vfs`] router.
//!
//! # Providers
//!
//! - [`MemoryProvider`] - In-memory storage for tests and embedded libraries
//! - [`FileSystemProvider`] - Native filesystem access
//! - [`FnProvider`] - Adapter for a plain `Fn(&str) -> Result<String, VfsError>`
//!
//! Custom providers can implement the [`SourceProvider`] trait for packed
//! archives or other storage backends.

mod error;
#[cfg(feature = "filesystem")]
mod filesystem;
mod memory;
pub mod path;
mod provider;
mod vfs;

pub use error::VfsError;
#[cfg(feature = "filesystem")]
pub use filesystem::FileSystemProvider;
pub use memory::MemoryProvider;
pub use provider::{FnProvider, SourceProvider};
pub use vfs::Vfs;
