//! SyncRAG Providers - Remote RAG backend descriptors
//!
//! Provides:
//! - [`AnythingLlmProvider`] - descriptor for the AnythingLLM RAG proxy
//! - [`ProviderRegistry`] - name-keyed lookup used to select a backend from
//!   configuration
//!
//! ## Modules
//!
//! - [`anythingllm`] - AnythingLLM descriptor
//! - [`registry`] - Provider registry

pub mod anythingllm;
pub mod registry;

pub use anythingllm::AnythingLlmProvider;
pub use registry::ProviderRegistry;

use thiserror::Error;

/// Errors that can occur while selecting a provider
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No registered provider matches the requested name
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A provider with the same name is already registered
    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),
}
