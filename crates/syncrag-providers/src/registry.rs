//! Provider registry
//!
//! Holds the providers known to this build, in registration order, and
//! resolves the one named in configuration. Names compare case-insensitively.

use syncrag_core::ports::{IRagProvider, ProviderInfo};
use tracing::debug;

use crate::{AnythingLlmProvider, ProviderError};

/// Ordered set of [`IRagProvider`]s keyed by name
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn IRagProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in provider
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.providers.push(Box::new(AnythingLlmProvider::new()));
        registry
    }

    /// Adds a provider
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::DuplicateProvider`] if a provider with the
    /// same name (case-insensitive) is already registered.
    pub fn register(&mut self, provider: Box<dyn IRagProvider>) -> Result<(), ProviderError> {
        if self.get(provider.name()).is_some() {
            return Err(ProviderError::DuplicateProvider(provider.name().to_string()));
        }
        debug!(name = provider.name(), "registering provider");
        self.providers.push(provider);
        Ok(())
    }

    /// Provider named `name`, if registered
    pub fn get(&self, name: &str) -> Option<&dyn IRagProvider> {
        self.providers
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
            .map(|p| &**p)
    }

    /// Resolves the provider named in configuration
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownProvider`] if nothing matches.
    pub fn select(&self, name: &str) -> Result<&dyn IRagProvider, ProviderError> {
        let provider = self
            .get(name)
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))?;
        debug!(name = provider.name(), version = provider.version(), "provider selected");
        Ok(provider)
    }

    /// Descriptors of all registered providers, in registration order
    pub fn list(&self) -> Vec<ProviderInfo> {
        self.providers.iter().map(|p| p.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
