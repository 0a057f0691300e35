//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces the synchronization driver depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRagProvider`] - Identity of a remote RAG backend (AnythingLLM, ...)
//! - [`ILocalFileSystem`] - Local filesystem discovery

pub mod local_filesystem;
pub mod rag_provider;

pub use local_filesystem::ILocalFileSystem;
pub use rag_provider::{IRagProvider, ProviderInfo};
