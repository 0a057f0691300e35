//! Providers command - List the RAG backends known to this build
//!
//! `syncrag providers` lists every registered provider and marks the one
//! selected by `provider.name`; `syncrag providers <NAME>` shows a single
//! provider's descriptor.

use anyhow::Result;
use clap::Args;
use syncrag_core::ports::ProviderInfo;
use syncrag_providers::ProviderRegistry;
use tracing::info;

use super::CommandContext;

/// Arguments for the providers subcommand
#[derive(Debug, Args)]
pub struct ProvidersCommand {
    /// Show only the provider with this name (case-insensitive)
    pub name: Option<String>,
}

impl ProvidersCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let registry = ProviderRegistry::with_builtin();
        let config = ctx.load_config();

        match &self.name {
            Some(name) => self.show_one(ctx, &registry, name),
            None => self.list_all(ctx, &registry, &config.provider.name),
        }
    }

    fn show_one(&self, ctx: &CommandContext, registry: &ProviderRegistry, name: &str) -> Result<()> {
        let formatter = ctx.formatter();
        let provider = registry.select(name)?;
        let descriptor = provider.info();

        if ctx.is_json() {
            formatter.print_json(&serde_json::to_value(&descriptor)?);
            return Ok(());
        }

        formatter.success(&descriptor.name);
        print_descriptor(&*formatter, &descriptor);
        Ok(())
    }

    fn list_all(&self, ctx: &CommandContext, registry: &ProviderRegistry, selected: &str) -> Result<()> {
        let formatter = ctx.formatter();
        let providers = registry.list();
        let active = registry.get(selected).map(|p| p.name().to_string());

        info!(count = providers.len(), selected = %selected, "Listing providers");

        if active.is_none() {
            formatter.warn(&format!(
                "Configured provider '{}' is not registered",
                selected
            ));
        }

        if ctx.is_json() {
            formatter.print_json(&serde_json::json!({
                "selected": active,
                "providers": providers,
            }));
            return Ok(());
        }

        formatter.success(&format!("{} provider(s) registered", providers.len()));
        for descriptor in &providers {
            let marker = if active.as_deref() == Some(descriptor.name.as_str()) {
                "*"
            } else {
                " "
            };
            formatter.info("");
            formatter.info(&format!("{} {}", marker, descriptor.name));
            print_descriptor(&*formatter, descriptor);
        }
        Ok(())
    }
}

fn print_descriptor(formatter: &dyn crate::output::OutputFormatter, descriptor: &ProviderInfo) {
    formatter.info(&format!("  Type:        {}", descriptor.provider_type));
    formatter.info(&format!("  Version:     {}", descriptor.version));
    formatter.info(&format!("  Description: {}", descriptor.description));
}
