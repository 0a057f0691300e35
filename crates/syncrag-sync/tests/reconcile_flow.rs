//! Integration test: YAML catalog → TreeBuilder → Reconciler
//!
//! Uses a real temporary directory as the local side to verify the full
//! driver flow, including a second pass after the local tree changes.

use std::io::Write;
use std::sync::Arc;

use syncrag_core::domain::Status;
use syncrag_sync::catalog::RemoteCatalog;
use syncrag_sync::filesystem::LocalFileSystemAdapter;
use syncrag_sync::tree::{Reconciler, TreeBuilder};
use tempfile::TempDir;

const CATALOG: &str = r#"
path: /kb
children:
  - path: /kb/intro.md
  - path: /kb/papers
    children:
      - path: /kb/papers/rag.pdf
      - path: /kb/papers/sync.pdf
"#;

fn write(dir: &TempDir, rel: &str) {
    let path = dir.path().join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"data").unwrap();
}

#[test]
fn test_catalog_file_to_reconciled_tree() {
    let mut catalog_file = tempfile::NamedTempFile::new().unwrap();
    catalog_file.write_all(CATALOG.as_bytes()).unwrap();
    catalog_file.flush().unwrap();
    let catalog = RemoteCatalog::load(catalog_file.path()).unwrap();

    let local = TempDir::new().unwrap();
    write(&local, "intro.md");
    write(&local, "papers/rag.pdf");

    let builder = TreeBuilder::new(Arc::new(LocalFileSystemAdapter::new()));

    let mut tree = builder.build(local.path(), catalog.root()).unwrap();
    let report = Reconciler::reconcile(&mut tree);
    assert!(!report.synchronized);
    assert_eq!(report.summary.count(Status::Synchronized), 2);
    assert_eq!(report.summary.count(Status::NotSynchronized), 1);
    assert_eq!(report.summary.count(Status::SynchronizedWithWarning), 2);

    // The missing file shows up locally; a fresh pass settles everything
    write(&local, "papers/sync.pdf");
    let mut tree = builder.build(local.path(), catalog.root()).unwrap();
    let report = Reconciler::reconcile(&mut tree);
    assert!(report.synchronized);
    assert_eq!(report.summary.count(Status::Synchronized), 5);

    assert!(builder.untracked(local.path(), catalog.root()).unwrap().is_empty());
}

#[test]
fn test_driver_can_override_a_subtree_after_reconcile() {
    let catalog = RemoteCatalog::from_yaml_str(CATALOG).unwrap();
    let local = TempDir::new().unwrap();
    for rel in ["intro.md", "papers/rag.pdf", "papers/sync.pdf"] {
        write(&local, rel);
    }

    let builder = TreeBuilder::new(Arc::new(LocalFileSystemAdapter::new()));
    let mut tree = builder.build(local.path(), catalog.root()).unwrap();
    Reconciler::reconcile(&mut tree);

    // An upload failure reported by the transfer layer for the papers folder
    tree.child_mut(1).unwrap().mark_synchronized_with_error();

    assert!(!tree.is_synchronized());
    assert_eq!(tree.status(), Status::Synchronized);
    assert_eq!(tree.status_summary().count(Status::SynchronizedWithError), 3);
}
