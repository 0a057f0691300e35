//! Local filesystem port (driven/secondary port)
//!
//! This module defines the interface the synchronization driver uses to
//! discover local filesystem objects before pairing them with remote entries.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because filesystem errors are adapter-specific.
//! - Calls are synchronous: discovery runs on the driver's thread and the
//!   tree it feeds has no suspension points.
//! - A missing path is not an error; adapters report it as
//!   [`FileSystemState::not_found`].

use std::path::{Path, PathBuf};

use crate::domain::local_state::FileSystemState;

/// Read-only access to the local filesystem
pub trait ILocalFileSystem: Send + Sync {
    /// Snapshot of `path`
    ///
    /// Returns a `not_found` state, not an error, when the path does not exist.
    fn get_state(&self, path: &Path) -> anyhow::Result<FileSystemState>;

    /// Direct children of the directory at `path`, sorted by path
    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>>;
}
