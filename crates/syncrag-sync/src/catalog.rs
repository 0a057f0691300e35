//! Remote catalog
//!
//! The remote side is described by a YAML document: a tree of nodes, each
//! with a `path` and optional `description`, `version` and `children`.
//!
//! ```yaml
//! path: /docs
//! description: Knowledge base
//! children:
//!   - path: /docs/readme.md
//!     version: "3"
//!   - path: /docs/guides/      # trailing separator: an empty directory
//! ```
//!
//! A node is a directory when it has a `children` key or its path ends with
//! a separator. Every node goes through the validated
//! [`File`]/[`Directory`] constructors, so a malformed path fails the load.

use std::path::Path;

use serde::Deserialize;
use syncrag_core::domain::{Directory, Entry, File};
use tracing::{debug, instrument};

use crate::SyncError;

/// One node of the catalog document
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogNode {
    path: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    children: Option<Vec<CatalogNode>>,
}

impl CatalogNode {
    fn is_directory(&self) -> bool {
        self.children.is_some() || self.path.ends_with(|c: char| c == '/' || c == '\\')
    }

    fn into_entry(self) -> Result<Entry, SyncError> {
        if !self.is_directory() {
            return Ok(File::new(self.path, self.description, self.version)?.into());
        }

        let children = self
            .children
            .unwrap_or_default()
            .into_iter()
            .map(CatalogNode::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Directory::with_entries(self.path, self.description, self.version, children)?.into())
    }
}

/// The remote side of a synchronization, rooted at a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCatalog {
    root: Directory,
}

impl RemoteCatalog {
    /// Wraps an already-built directory
    pub fn new(root: Directory) -> Self {
        Self { root }
    }

    /// Parses a catalog document
    ///
    /// # Errors
    ///
    /// - [`SyncError::InvalidCatalog`] if the YAML does not match the schema
    /// - [`SyncError::DomainError`] if a path yields no usable name
    /// - [`SyncError::CatalogRootNotDirectory`] if the top-level node is a file
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SyncError> {
        let node: CatalogNode = serde_yaml::from_str(yaml)?;
        match node.into_entry()? {
            Entry::Directory(root) => Ok(Self { root }),
            Entry::File(file) => Err(SyncError::CatalogRootNotDirectory(file.path().to_string())),
        }
    }

    /// Reads and parses the catalog file at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        debug!(entries = catalog.entry_count(), "catalog loaded");
        Ok(catalog)
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn into_root(self) -> Directory {
        self.root
    }

    /// Number of entries below the root, at any depth
    pub fn entry_count(&self) -> usize {
        fn count(dir: &Directory) -> usize {
            dir.iter()
                .map(|e| 1 + e.as_directory().map_or(0, count))
                .sum()
        }
        count(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use syncrag_core::domain::DomainError;

    use super::*;

    const SAMPLE: &str = r#"
path: /docs
description: Knowledge base
version: "1"
children:
  - path: /docs/readme.md
    description: Entry point
    version: "3"
  - path: /docs/guides
    children:
      - path: /docs/guides/setup.txt
  - path: /docs/empty/
"#;

    #[test]
    fn test_parse_sample() {
        let catalog = RemoteCatalog::from_yaml_str(SAMPLE).unwrap();
        let root = catalog.root();

        assert_eq!(root.name(), "docs");
        assert_eq!(root.description(), "Knowledge base");
        assert_eq!(root.count(), 3);
        assert_eq!(catalog.entry_count(), 4);

        let readme = root.get_entry("README.md").unwrap().unwrap();
        assert_eq!(readme.entry_type(), ".md");
        assert_eq!(readme.version(), "3");

        let guides = root.get_entry("guides").unwrap().and_then(Entry::as_directory).unwrap();
        assert_eq!(guides.get_entry_at(0).unwrap().name(), "setup.txt");

        let empty = root.get_entry_at(2).unwrap();
        assert!(empty.is_directory());
        assert_eq!(empty.name(), "empty");
    }

    #[test]
    fn test_root_must_be_directory() {
        let err = RemoteCatalog::from_yaml_str("path: /single.txt\n").unwrap_err();
        assert!(matches!(err, SyncError::CatalogRootNotDirectory(p) if p == "/single.txt"));
    }

    #[test]
    fn test_malformed_path_is_rejected() {
        let yaml = "path: /docs\nchildren:\n  - path: \"\"\n";
        let err = RemoteCatalog::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            SyncError::DomainError(DomainError::MalformedIdentity(_))
        ));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = RemoteCatalog::from_yaml_str("path: /docs\nsize: 3\n").unwrap_err();
        assert!(matches!(err, SyncError::InvalidCatalog(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(SAMPLE.as_bytes()).unwrap();
        tmp.flush().unwrap();

        let catalog = RemoteCatalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.root().path(), "/docs");
    }

    #[test]
    fn test_load_missing_file() {
        let err = RemoteCatalog::load(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, SyncError::IoError(_)));
    }
}
