//! AnythingLLM provider descriptor

use syncrag_core::ports::IRagProvider;

/// Descriptor for the AnythingLLM RAG proxy
#[derive(Debug, Clone, Copy, Default)]
pub struct AnythingLlmProvider;

impl AnythingLlmProvider {
    pub const NAME: &'static str = "AnythingLLM";

    pub fn new() -> Self {
        Self
    }
}

impl IRagProvider for AnythingLlmProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn provider_type(&self) -> &str {
        "LLM & RAG proxy"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> &str {
        "AnythingLLM is a provider for SyncRAG that allows you to use AnythingLLM as RAG system."
    }
}
