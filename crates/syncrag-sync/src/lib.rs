//! SyncRAG Sync - Reference synchronization driver
//!
//! Provides:
//! - Local filesystem discovery
//! - Remote catalog loading from YAML
//! - Construction of the `SynchronizedItem` tree from both sides
//! - A reconciliation pass that assigns a status to every node
//!
//! ## Modules
//!
//! - [`catalog`] - YAML remote catalog
//! - [`filesystem`] - Local filesystem adapter
//! - [`tree`] - Tree builder and reconciler

pub mod catalog;
pub mod filesystem;
pub mod tree;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during synchronization operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error occurred while reading input files
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The remote catalog could not be parsed
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(#[from] serde_yaml::Error),

    /// The remote catalog's top-level node is a file
    #[error("Catalog root is not a directory: {0}")]
    CatalogRootNotDirectory(String),

    /// The local sync root does not exist
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A filesystem adapter failure
    #[error(transparent)]
    Filesystem(#[from] anyhow::Error),

    /// A domain-level error propagated from syncrag-core
    #[error("Domain error: {0}")]
    DomainError(#[from] syncrag_core::domain::DomainError),
}
