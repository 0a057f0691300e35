//! RAG provider port
//!
//! A provider is the remote backend that receives synchronized content, such
//! as an LLM proxy with retrieval-augmented generation. At this layer a
//! provider is only an identity: name, type, version and description. The
//! synchronization driver picks one by name at configuration time; the tree
//! never references it.
//!
//! ## Design Notes
//!
//! - The trait is object-safe so registries can hold `Box<dyn IRagProvider>`.
//! - `Send + Sync` lets a registry be shared behind an `Arc`.

use serde::Serialize;

/// Identity of a remote RAG backend
pub trait IRagProvider: Send + Sync {
    /// Display name, unique within a registry (e.g., "AnythingLLM")
    fn name(&self) -> &str;

    /// Kind of backend (e.g., "LLM & RAG proxy")
    fn provider_type(&self) -> &str;

    fn version(&self) -> &str;

    fn description(&self) -> &str;

    /// Owned snapshot of the descriptor
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: self.name().to_string(),
            provider_type: self.provider_type().to_string(),
            version: self.version().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// Serializable copy of an [`IRagProvider`] descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub version: String,
    pub description: String,
}
