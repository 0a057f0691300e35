//! SynchronizedItem domain entity
//!
//! A [`SynchronizedItem`] pairs the local view of a filesystem object
//! ([`FileSystemState`]) with its remote view ([`Entry`]) and records the
//! [`Status`] of that pair. Items form a tree mirroring the directory
//! hierarchy; each node owns its children outright and there are no parent
//! pointers, so every traversal runs parent to child.
//!
//! ## Status broadcast
//!
//! Every status setter rewrites the whole subtree:
//!
//! ```text
//!   root.mark_synchronized()
//!
//!        root ──────────► Synchronized      (1)
//!        ├── a ─────────► Synchronized      (2)
//!        │   └── a1 ────► Synchronized      (3)
//!        └── b ─────────► Synchronized      (4)
//!            └── b1 ────► Synchronized      (5)
//! ```
//!
//! Nodes are visited depth-first in pre-order. The call cannot fail and never
//! stops early. To give a single node a different status from its subtree,
//! broadcast on the parent first and then on the child through
//! [`SynchronizedItem::child_mut`] or [`SynchronizedItem::children_mut`].
//!
//! The tree is not synchronized internally. Callers that share it across
//! threads must serialize access themselves.

use std::collections::BTreeMap;

use serde::Serialize;

use super::entry::{Directory, Entry, File};
use super::errors::DomainError;
use super::local_state::FileSystemState;
use super::status::Status;

// ============================================================================
// SynchronizedItem
// ============================================================================

/// A node of the synchronization tree
///
/// Equality is structural: local state, remote entry, status and children.
/// [`SynchronizedItem::remove_child`] and [`SynchronizedItem::contains_child`]
/// match on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynchronizedItem {
    /// Local filesystem snapshot
    local: FileSystemState,
    /// Remote catalog entry
    remote: Entry,
    /// Current synchronization status
    status: Status,
    /// Owned children in insertion order
    children: Vec<SynchronizedItem>,
}

impl SynchronizedItem {
    /// Creates a leaf item with [`Status::NotSynchronized`]
    pub fn new(local: FileSystemState, remote: impl Into<Entry>) -> Self {
        Self::with_status(local, remote, Status::NotSynchronized)
    }

    /// Creates a leaf item with an explicit initial status
    pub fn with_status(local: FileSystemState, remote: impl Into<Entry>, status: Status) -> Self {
        Self::with_children(local, remote, status, Vec::new())
    }

    /// Creates an item seeded with `children`, in iteration order
    pub fn with_children(
        local: FileSystemState,
        remote: impl Into<Entry>,
        status: Status,
        children: impl IntoIterator<Item = SynchronizedItem>,
    ) -> Self {
        Self {
            local,
            remote: remote.into(),
            status,
            children: children.into_iter().collect(),
        }
    }

    /// Pairs a local file with its remote file entry
    pub fn for_file(local: FileSystemState, remote: File) -> Self {
        Self::new(local, remote)
    }

    /// Pairs a local directory with its remote directory entry
    pub fn for_directory(local: FileSystemState, remote: Directory) -> Self {
        Self::new(local, remote)
    }

    // --- Getters ---

    pub fn local(&self) -> &FileSystemState {
        &self.local
    }

    pub fn remote(&self) -> &Entry {
        &self.remote
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Direct children in insertion order
    pub fn children(&self) -> &[SynchronizedItem] {
        &self.children
    }

    /// Direct children, mutable in place
    ///
    /// The slice allows status changes on individual children but not
    /// adding or removing them.
    pub fn children_mut(&mut self) -> &mut [SynchronizedItem] {
        &mut self.children
    }

    /// Child at `index`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] if `index >= child_count()`.
    pub fn child(&self, index: usize) -> Result<&SynchronizedItem, DomainError> {
        let len = self.children.len();
        self.children
            .get(index)
            .ok_or(DomainError::OutOfRange { index, len })
    }

    /// Mutable child at `index`
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::OutOfRange`] if `index >= child_count()`.
    pub fn child_mut(&mut self, index: usize) -> Result<&mut SynchronizedItem, DomainError> {
        let len = self.children.len();
        self.children
            .get_mut(index)
            .ok_or(DomainError::OutOfRange { index, len })
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True if this node and every direct child are [`Status::Synchronized`]
    ///
    /// Grandchildren are not inspected.
    pub fn is_synchronized(&self) -> bool {
        self.status.is_synchronized() && self.children.iter().all(|c| c.status.is_synchronized())
    }

    // --- Tree mutation ---

    /// Appends a child after the existing ones
    pub fn add_child(&mut self, child: SynchronizedItem) {
        self.children.push(child);
    }

    /// Appends several children, keeping their order
    pub fn add_children(&mut self, children: impl IntoIterator<Item = SynchronizedItem>) {
        self.children.extend(children);
    }

    /// Removes the first child structurally equal to `child`
    ///
    /// Returns `true` if a child was removed. A node that is not a child is
    /// ignored.
    pub fn remove_child(&mut self, child: &SynchronizedItem) -> bool {
        match self.children.iter().position(|c| c == child) {
            Some(idx) => {
                self.children.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Removes the first match for each of `children`, returning how many
    /// were removed
    pub fn remove_children<'a>(
        &mut self,
        children: impl IntoIterator<Item = &'a SynchronizedItem>,
    ) -> usize {
        children
            .into_iter()
            .filter(|child| self.remove_child(child))
            .count()
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Returns true if some direct child is structurally equal to `child`
    pub fn contains_child(&self, child: &SynchronizedItem) -> bool {
        self.children.contains(child)
    }

    // --- Status broadcast ---

    /// Sets `status` on this node and every descendant, pre-order
    fn broadcast(&mut self, status: Status) {
        let mut stack: Vec<&mut SynchronizedItem> = vec![self];
        while let Some(node) = stack.pop() {
            node.status = status;
            stack.extend(node.children.iter_mut().rev());
        }
    }

    /// Sets `status` on the whole subtree
    pub fn set_status(&mut self, status: Status) {
        self.broadcast(status);
    }

    pub fn mark_synchronized(&mut self) {
        self.broadcast(Status::Synchronized);
    }

    pub fn mark_synchronizing(&mut self) {
        self.broadcast(Status::Synchronizing);
    }

    pub fn mark_synchronized_with_conflict(&mut self) {
        self.broadcast(Status::SynchronizedWithConflict);
    }

    pub fn mark_synchronized_with_warning(&mut self) {
        self.broadcast(Status::SynchronizedWithWarning);
    }

    pub fn mark_synchronized_with_error(&mut self) {
        self.broadcast(Status::SynchronizedWithError);
    }

    pub fn mark_synchronized_with_info(&mut self) {
        self.broadcast(Status::SynchronizedWithInfo);
    }

    pub fn mark_not_synchronized(&mut self) {
        self.broadcast(Status::NotSynchronized);
    }

    // --- Traversal ---

    /// Pre-order iterator over this node and all descendants
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Number of nodes below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// Per-status node counts over the subtree, this node included
    pub fn status_summary(&self) -> StatusSummary {
        self.iter().map(SynchronizedItem::status).collect()
    }
}

/// Pre-order iterator returned by [`SynchronizedItem::iter`]
pub struct Iter<'a> {
    stack: Vec<&'a SynchronizedItem>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a SynchronizedItem;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a SynchronizedItem {
    type Item = &'a SynchronizedItem;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// StatusSummary
// ============================================================================

/// Node counts per [`Status`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    counts: BTreeMap<Status, usize>,
}

impl StatusSummary {
    /// Number of nodes with `status`
    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Total number of nodes counted
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Statuses with a non-zero count, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Status, usize)> + '_ {
        self.counts.iter().map(|(status, count)| (*status, *count))
    }

    /// Records one more node with `status`
    pub fn record(&mut self, status: Status) {
        *self.counts.entry(status).or_insert(0) += 1;
    }
}

impl FromIterator<Status> for StatusSummary {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        let mut summary = StatusSummary::default();
        for status in iter {
            summary.record(status);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_item(path: &str) -> SynchronizedItem {
        let remote = File::new(path, "Test item", "1.0.0").unwrap();
        SynchronizedItem::for_file(FileSystemState::file(path, 4, None), remote)
    }

    fn dir_item(path: &str) -> SynchronizedItem {
        let remote = Directory::new(path, "", "").unwrap();
        SynchronizedItem::for_directory(FileSystemState::directory(path, None), remote)
    }

    /// root -> (a -> a1), (b -> b1)
    fn three_level_tree() -> SynchronizedItem {
        let mut a = dir_item("/r/a");
        a.add_child(file_item("/r/a/a1.txt"));
        let mut b = dir_item("/r/b");
        b.add_child(file_item("/r/b/b1.txt"));

        let mut root = dir_item("/r");
        root.add_children([a, b]);
        root
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_defaults_to_not_synchronized() {
            let local = FileSystemState::file("/remotePath/to/item", 0, None);
            let remote = File::new("/remotePath/to/item", "Test item", "1.0.0").unwrap();
            let item = SynchronizedItem::new(local.clone(), remote.clone());

            assert_eq!(item.local(), &local);
            assert_eq!(item.remote(), &Entry::File(remote));
            assert_eq!(item.status(), Status::NotSynchronized);
            assert!(!item.has_children());
        }

        #[test]
        fn test_with_status() {
            let remote = File::new("/remotePath/to/item", "", "").unwrap();
            let item = SynchronizedItem::with_status(
                FileSystemState::not_found("/x"),
                remote,
                Status::Synchronized,
            );
            assert_eq!(item.status(), Status::Synchronized);
        }

        #[test]
        fn test_with_children_keeps_order() {
            let children = vec![file_item("/d/1"), file_item("/d/2")];
            let item = SynchronizedItem::with_children(
                FileSystemState::directory("/d", None),
                Directory::new("/d", "", "").unwrap(),
                Status::Synchronizing,
                children.clone(),
            );
            assert_eq!(item.children(), children.as_slice());
            assert_eq!(item.status(), Status::Synchronizing);
        }
    }

    mod membership_tests {
        use super::*;

        #[test]
        fn test_add_and_contains_child() {
            let mut item = dir_item("/d");
            let child = file_item("/d/c.txt");
            item.add_child(child.clone());

            assert!(item.contains_child(&child));
            assert_eq!(item.child_count(), 1);
        }

        #[test]
        fn test_remove_child() {
            let mut item = dir_item("/d");
            let child = file_item("/d/c.txt");
            item.add_child(child.clone());

            assert!(item.remove_child(&child));
            assert!(!item.contains_child(&child));
        }

        #[test]
        fn test_remove_child_never_added_is_noop() {
            let mut item = dir_item("/d");
            let kept = file_item("/d/kept.txt");
            item.add_child(kept.clone());

            assert!(!item.remove_child(&file_item("/d/stranger.txt")));
            assert_eq!(item.child_count(), 1);
            assert!(item.contains_child(&kept));
        }

        #[test]
        fn test_remove_children_first_match_each() {
            let mut item = dir_item("/d");
            let dup = file_item("/d/dup.txt");
            item.add_children([dup.clone(), dup.clone(), file_item("/d/other.txt")]);

            let removed = item.remove_children([&dup, &file_item("/d/none.txt")]);
            assert_eq!(removed, 1);
            assert_eq!(item.child_count(), 2);
            assert!(item.contains_child(&dup));
        }

        #[test]
        fn test_status_is_part_of_identity() {
            let mut item = dir_item("/d");
            let child = file_item("/d/c.txt");
            item.add_child(child.clone());
            item.mark_synchronized();

            assert!(!item.contains_child(&child));
        }

        #[test]
        fn test_clear_children() {
            let mut item = dir_item("/d");
            let c1 = file_item("/d/1.txt");
            let c2 = file_item("/d/2.txt");
            item.add_children([c1.clone(), c2.clone()]);

            item.clear_children();
            assert!(!item.contains_child(&c1));
            assert!(!item.contains_child(&c2));
            assert!(!item.has_children());
        }

        #[test]
        fn test_child_index_bounds() {
            let mut item = three_level_tree();
            assert_eq!(item.child(1).unwrap().remote().name(), "b");
            assert_eq!(
                item.child(2),
                Err(DomainError::OutOfRange { index: 2, len: 2 })
            );
            assert!(item.child_mut(5).is_err());
            assert_eq!(item.child_count(), 2);
        }
    }

    mod broadcast_tests {
        use super::*;

        #[test]
        fn test_each_setter_reaches_every_node() {
            let cases: [(fn(&mut SynchronizedItem), Status); 7] = [
                (SynchronizedItem::mark_synchronized, Status::Synchronized),
                (SynchronizedItem::mark_synchronizing, Status::Synchronizing),
                (
                    SynchronizedItem::mark_synchronized_with_conflict,
                    Status::SynchronizedWithConflict,
                ),
                (
                    SynchronizedItem::mark_synchronized_with_warning,
                    Status::SynchronizedWithWarning,
                ),
                (
                    SynchronizedItem::mark_synchronized_with_error,
                    Status::SynchronizedWithError,
                ),
                (
                    SynchronizedItem::mark_synchronized_with_info,
                    Status::SynchronizedWithInfo,
                ),
                (
                    SynchronizedItem::mark_not_synchronized,
                    Status::NotSynchronized,
                ),
            ];

            for (mark, expected) in cases {
                let mut root = three_level_tree();
                // Scramble prior statuses so the broadcast has to overwrite them
                root.child_mut(0).unwrap().set_status(Status::SynchronizedWithError);
                root.child_mut(1).unwrap().children_mut()[0].set_status(Status::Synchronizing);

                mark(&mut root);
                assert!(root.iter().all(|n| n.status() == expected), "{expected}");
                assert_eq!(root.iter().count(), 5);
            }
        }

        #[test]
        fn test_set_status_changes_children() {
            let mut item = dir_item("/d");
            item.add_child(file_item("/d/c.txt"));
            item.set_status(Status::Synchronized);
            assert_eq!(item.children()[0].status(), Status::Synchronized);
        }

        #[test]
        fn test_broadcast_on_subtree_leaves_siblings() {
            let mut root = three_level_tree();
            root.child_mut(0).unwrap().mark_synchronized_with_conflict();

            let a = root.child(0).unwrap();
            assert_eq!(a.status(), Status::SynchronizedWithConflict);
            assert_eq!(a.children()[0].status(), Status::SynchronizedWithConflict);
            assert_eq!(root.status(), Status::NotSynchronized);
            assert_eq!(root.child(1).unwrap().status(), Status::NotSynchronized);
        }

        #[test]
        fn test_six_node_tree_fully_synchronized() {
            let mut a = dir_item("/r/a");
            a.add_children([file_item("/r/a/a1.txt"), file_item("/r/a/a2.txt")]);
            let mut b = dir_item("/r/b");
            b.add_child(file_item("/r/b/b1.txt"));
            let mut root = dir_item("/r");
            root.add_children([a, b]);
            root.child_mut(0).unwrap().mark_synchronized_with_error();

            root.mark_synchronized();
            assert_eq!(root.iter().count(), 6);
            assert!(root.iter().all(|n| n.status() == Status::Synchronized));
            assert!(root.is_synchronized());
        }
    }

    mod is_synchronized_tests {
        use super::*;

        #[test]
        fn test_requires_self_and_direct_children() {
            let mut root = three_level_tree();
            assert!(!root.is_synchronized());

            root.mark_synchronized();
            assert!(root.is_synchronized());

            root.child_mut(1).unwrap().mark_synchronizing();
            assert!(!root.is_synchronized());
        }

        #[test]
        fn test_grandchildren_are_not_inspected() {
            let mut root = three_level_tree();
            root.mark_synchronized();
            root.child_mut(0).unwrap().children_mut()[0].mark_not_synchronized();

            assert!(root.is_synchronized());
            assert!(!root.child(0).unwrap().is_synchronized());
        }

        #[test]
        fn test_leaf() {
            let mut leaf = file_item("/f.txt");
            assert!(!leaf.is_synchronized());
            leaf.mark_synchronized();
            assert!(leaf.is_synchronized());
        }
    }

    mod traversal_tests {
        use super::*;

        #[test]
        fn test_iter_is_pre_order() {
            let root = three_level_tree();
            let names: Vec<&str> = root.iter().map(|n| n.remote().name()).collect();
            assert_eq!(names, ["r", "a", "a1.txt", "b", "b1.txt"]);
            assert_eq!(root.descendant_count(), 4);
        }

        #[test]
        fn test_status_summary() {
            let mut root = three_level_tree();
            root.child_mut(1).unwrap().mark_synchronized_with_warning();

            let summary = root.status_summary();
            assert_eq!(summary.total(), 5);
            assert_eq!(summary.count(Status::NotSynchronized), 3);
            assert_eq!(summary.count(Status::SynchronizedWithWarning), 2);
            assert_eq!(summary.count(Status::Synchronized), 0);
        }
    }
}
