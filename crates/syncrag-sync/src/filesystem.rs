//! Local filesystem adapter
//!
//! Implements [`ILocalFileSystem`] on top of `std::fs`. Discovery is
//! read-only: the adapter never creates, writes or deletes anything.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use syncrag_core::domain::FileSystemState;
use syncrag_core::ports::ILocalFileSystem;
use tracing::{debug, instrument};

/// Local filesystem adapter backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystemAdapter;

impl LocalFileSystemAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ILocalFileSystem for LocalFileSystemAdapter {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn get_state(&self, path: &Path) -> anyhow::Result<FileSystemState> {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("path not found");
                return Ok(FileSystemState::not_found(path));
            }
            Err(e) => return Err(e.into()),
        };

        // Convert system modified time to DateTime<Utc>.
        let modified = metadata.modified().ok().and_then(|st| {
            st.duration_since(std::time::UNIX_EPOCH)
                .ok()
                .and_then(|dur| DateTime::from_timestamp(dur.as_secs() as i64, dur.subsec_nanos()))
        });

        let state = if metadata.is_file() {
            FileSystemState::file(path, metadata.len(), modified)
        } else {
            FileSystemState::directory(path, modified)
        };

        debug!(is_file = state.is_file, size = state.size, "state retrieved");
        Ok(state)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn list_dir(&self, path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort();
        debug!(count = entries.len(), "directory listed");
        Ok(entries)
    }
}
