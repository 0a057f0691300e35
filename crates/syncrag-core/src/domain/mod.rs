//! Domain entities and business logic
//!
//! This module contains the core domain types for SyncRAG:
//! - Remote entry hierarchy (`Entry`, `File`, `Directory`)
//! - Local filesystem snapshots carried by tree nodes
//! - Synchronization status and the `SynchronizedItem` tree
//! - Domain-specific error types

pub mod entry;
pub mod errors;
pub mod local_state;
pub mod status;
pub mod synchronized_item;

// Re-export commonly used types
pub use entry::{Directory, Entry, File, DIRECTORY_TYPE};
pub use errors::DomainError;
pub use local_state::FileSystemState;
pub use status::Status;
pub use synchronized_item::{StatusSummary, SynchronizedItem};
