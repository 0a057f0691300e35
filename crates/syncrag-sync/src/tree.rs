//! Tree construction and reconciliation
//!
//! [`TreeBuilder`] pairs every catalog entry with the local object at the
//! matching position under the sync root and assembles the
//! [`SynchronizedItem`] tree, children before parents. [`Reconciler`] then
//! walks the tree and assigns each node a status.
//!
//! ## Reconciliation rules
//!
//! | Local object                         | Status                      |
//! |--------------------------------------|-----------------------------|
//! | missing                              | `NotSynchronized`           |
//! | kind differs from the remote entry   | `SynchronizedWithError`     |
//! | file                                 | `Synchronized`              |
//! | directory, all children synchronized | `Synchronized`              |
//! | directory, otherwise                 | `SynchronizedWithWarning`   |
//!
//! Statuses are computed bottom-up but applied top-down: each node's status
//! is broadcast over its subtree, then its children overwrite their own
//! subtrees with theirs. This comparison does not merge or transfer content.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use syncrag_core::domain::{
    Directory, Entry, FileSystemState, Status, StatusSummary, SynchronizedItem,
};
use syncrag_core::ports::ILocalFileSystem;
use tracing::{debug, info, instrument, warn};

use crate::SyncError;

// ============================================================================
// TreeBuilder
// ============================================================================

/// Builds a [`SynchronizedItem`] tree from a local root and a remote catalog
pub struct TreeBuilder {
    filesystem: Arc<dyn ILocalFileSystem>,
}

impl TreeBuilder {
    pub fn new(filesystem: Arc<dyn ILocalFileSystem>) -> Self {
        Self { filesystem }
    }

    /// Pairs `catalog` with the local directory `local_root`
    ///
    /// The catalog root maps to `local_root`. Every child maps to the object
    /// of the same name listed in its parent's local directory, an exact
    /// match first, then a case-insensitive one. Unmatched children are
    /// missing locally; `.` and `..` never match.
    ///
    /// # Errors
    ///
    /// - [`SyncError::PathNotFound`] if `local_root` does not exist
    /// - [`SyncError::Filesystem`] if a local path cannot be inspected
    #[instrument(skip(self, catalog), fields(root = %local_root.display(), catalog = catalog.path()))]
    pub fn build(&self, local_root: &Path, catalog: &Directory) -> Result<SynchronizedItem, SyncError> {
        let root_state = self.filesystem.get_state(local_root)?;
        if !root_state.exists {
            return Err(SyncError::PathNotFound(local_root.to_path_buf()));
        }

        let tree = self.build_node(root_state, &Entry::Directory(catalog.clone()))?;
        info!(nodes = tree.iter().count(), "synchronization tree built");
        Ok(tree)
    }

    fn build_node(&self, local: FileSystemState, remote: &Entry) -> Result<SynchronizedItem, SyncError> {
        let mut children = Vec::new();
        if let Entry::Directory(dir) = remote {
            // Nothing can exist below a missing directory or a file
            let listing = if local.is_directory() {
                self.filesystem.list_dir(local.path())?
            } else {
                Vec::new()
            };

            for child in dir {
                if is_relative_segment(child.name()) {
                    warn!(path = child.path(), "catalog entry points outside its parent");
                }
                let child_state = match local_match(&listing, child) {
                    Some(idx) => self.filesystem.get_state(&listing[idx])?,
                    None => FileSystemState::not_found(local.path().join(child.name())),
                };
                children.push(self.build_node(child_state, child)?);
            }
        }

        debug!(path = %local.path().display(), children = children.len(), "node paired");
        Ok(SynchronizedItem::with_children(
            local,
            remote.clone(),
            Status::NotSynchronized,
            children,
        ))
    }

    /// Local objects under `local_root` that have no catalog entry
    ///
    /// Local objects are paired with catalog entries by the same rule
    /// [`TreeBuilder::build`] uses, so every local object is either paired
    /// or reported here. Directories missing from the catalog are reported
    /// once, without descending into them.
    #[instrument(skip(self, catalog), fields(root = %local_root.display()))]
    pub fn untracked(&self, local_root: &Path, catalog: &Directory) -> Result<Vec<PathBuf>, SyncError> {
        let mut untracked = Vec::new();
        let mut pending: Vec<(PathBuf, &Directory)> = vec![(local_root.to_path_buf(), catalog)];

        while let Some((dir_path, remote_dir)) = pending.pop() {
            if !self.filesystem.get_state(&dir_path)?.is_directory() {
                continue;
            }

            let listing = self.filesystem.list_dir(&dir_path)?;
            let mut paired = vec![false; listing.len()];
            for child in remote_dir {
                let Some(idx) = local_match(&listing, child) else {
                    continue;
                };
                paired[idx] = true;
                if let Entry::Directory(sub) = child {
                    pending.push((listing[idx].clone(), sub));
                }
            }

            untracked.extend(
                listing
                    .into_iter()
                    .zip(paired)
                    .filter(|(_, is_paired)| !is_paired)
                    .map(|(path, _)| path),
            );
        }

        untracked.sort();
        if !untracked.is_empty() {
            warn!(count = untracked.len(), "local objects missing from catalog");
        }
        Ok(untracked)
    }
}

/// `.` and `..` name no object of their own below a parent
fn is_relative_segment(name: &str) -> bool {
    name == "." || name == ".."
}

/// Index in `listing` of the local object paired with `remote`
///
/// An exact name wins; otherwise the first case-insensitive match is used.
/// Only objects listed in the parent can match. Entry names are never
/// blank, so neither are the local names they pair with.
fn local_match(listing: &[PathBuf], remote: &Entry) -> Option<usize> {
    if is_relative_segment(remote.name()) {
        return None;
    }
    let names: Vec<Option<String>> = listing
        .iter()
        .map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();

    names
        .iter()
        .position(|n| n.as_deref() == Some(remote.name()))
        .or_else(|| {
            names
                .iter()
                .position(|n| n.as_deref().is_some_and(|name| remote.name_matches(name)))
        })
}

// ============================================================================
// Reconciler
// ============================================================================

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Node counts per status after the pass
    pub summary: StatusSummary,
    /// Whether the root and its direct children ended up synchronized
    pub synchronized: bool,
}

/// Computed status of a node and of its children, in child order
struct Verdict {
    status: Status,
    children: Vec<Verdict>,
}

/// Assigns a status to every node of a tree by comparing local and remote
pub struct Reconciler;

impl Reconciler {
    /// Reconciles `tree` in place
    #[instrument(skip_all, fields(root = tree.remote().path()))]
    pub fn reconcile(tree: &mut SynchronizedItem) -> ReconcileReport {
        tree.mark_synchronizing();

        let verdict = Self::assess(tree);
        Self::apply(tree, &verdict);

        let report = ReconcileReport {
            summary: tree.status_summary(),
            synchronized: tree.is_synchronized(),
        };
        info!(
            nodes = report.summary.total(),
            synchronized = report.summary.count(Status::Synchronized),
            not_synchronized = report.summary.count(Status::NotSynchronized),
            errors = report.summary.count(Status::SynchronizedWithError),
            "reconciliation complete"
        );
        report
    }

    fn assess(node: &SynchronizedItem) -> Verdict {
        let local = node.local();
        let remote = node.remote();
        let children: Vec<Verdict> = node.children().iter().map(Self::assess).collect();

        let status = if !local.exists {
            Status::NotSynchronized
        } else if local.is_file != remote.is_file() {
            debug!(path = remote.path(), "local and remote kinds differ");
            Status::SynchronizedWithError
        } else if remote.is_file() {
            Status::Synchronized
        } else if children.iter().all(|c| c.status.is_synchronized()) {
            Status::Synchronized
        } else {
            Status::SynchronizedWithWarning
        };

        Verdict { status, children }
    }

    fn apply(node: &mut SynchronizedItem, verdict: &Verdict) {
        node.set_status(verdict.status);
        for (child, child_verdict) in node.children_mut().iter_mut().zip(&verdict.children) {
            Self::apply(child, child_verdict);
        }
    }
}
