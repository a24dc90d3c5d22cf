//! Cross-platform utilities
//!
//! - [`fs`] - atomic writes and path helpers

pub mod fs;

pub use fs::{atomic_write, normalize_path, relative_slash_path, safe_write};
