//! Storage layer for atomic file operations.

mod atomic_toml;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub(crate) use atomic_toml::temp_path;
