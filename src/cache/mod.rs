//! Local artifact cache
//!
//! Installer artifacts are cached under the cache root at the same relative path
//! they have in the repository. Nothing is evicted.

pub mod paths;

pub use paths::{ArtifactPaths, resolve_cache_root};
