//! Local filesystem snapshot
//!
//! The synchronization tree carries one [`FileSystemState`] per node as an
//! opaque payload. Only the synchronization driver looks inside it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of a file's state on the local filesystem
///
/// Captures existence, kind, size and modification time of a path at a point
/// in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSystemState {
    /// The path this snapshot describes
    pub path: PathBuf,
    /// Whether the file/directory exists on disk
    pub exists: bool,
    /// Whether this is a regular file (false for directories and other types)
    pub is_file: bool,
    /// Size in bytes (0 for directories or non-existent files)
    pub size: u64,
    /// Last modification time (None if not available or file doesn't exist)
    pub modified: Option<DateTime<Utc>>,
}

impl FileSystemState {
    /// Returns a state representing a non-existent path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exists: false,
            is_file: false,
            size: 0,
            modified: None,
        }
    }

    /// Returns a state for an existing regular file
    pub fn file(path: impl Into<PathBuf>, size: u64, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            path: path.into(),
            exists: true,
            is_file: true,
            size,
            modified,
        }
    }

    /// Returns a state for an existing directory
    pub fn directory(path: impl Into<PathBuf>, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            path: path.into(),
            exists: true,
            is_file: false,
            size: 0,
            modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the file exists and is a regular file
    pub fn is_regular_file(&self) -> bool {
        self.exists && self.is_file
    }

    /// Returns true if the file exists and is a directory
    pub fn is_directory(&self) -> bool {
        self.exists && !self.is_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let missing = FileSystemState::not_found("/tmp/missing");
        assert!(!missing.exists);
        assert!(!missing.is_regular_file());
        assert!(!missing.is_directory());

        let file = FileSystemState::file("/tmp/a.txt", 12, None);
        assert!(file.is_regular_file());
        assert_eq!(file.size, 12);

        let dir = FileSystemState::directory("/tmp", Some(Utc::now()));
        assert!(dir.is_directory());
        assert_eq!(dir.path(), Path::new("/tmp"));
    }
}
