//! Status command - Display synchronization status
//!
//! Provides the `syncrag status` CLI command which:
//! 1. Loads the remote catalog and pairs it with the local sync root
//! 2. Reconciles the resulting tree
//! 3. Prints every node with its status, then counts by status
//! 4. Lists local objects the catalog does not mention

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use syncrag_core::domain::{Status, SynchronizedItem};
use syncrag_providers::ProviderRegistry;
use syncrag_sync::catalog::RemoteCatalog;
use syncrag_sync::filesystem::LocalFileSystemAdapter;
use syncrag_sync::tree::{Reconciler, TreeBuilder};
use tracing::info;

use super::CommandContext;

/// Status command with optional overrides for the configured paths
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Remote catalog file (defaults to `sync.catalog`)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Local sync root (defaults to `sync.root`)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl StatusCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let config = ctx.load_config();

        let registry = ProviderRegistry::with_builtin();
        let provider = registry
            .select(&config.provider.name)
            .context("Failed to resolve the configured provider")?;

        let catalog_path = self
            .catalog
            .clone()
            .unwrap_or_else(|| config.sync.resolved_catalog());
        let root = self
            .root
            .clone()
            .unwrap_or_else(|| config.sync.resolved_root());

        info!(
            provider = provider.name(),
            root = %root.display(),
            catalog = %catalog_path.display(),
            "Showing status"
        );

        let catalog = RemoteCatalog::load(&catalog_path)
            .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

        let builder = TreeBuilder::new(Arc::new(LocalFileSystemAdapter::new()));
        let mut tree = builder
            .build(&root, catalog.root())
            .with_context(|| format!("Failed to scan {}", root.display()))?;
        let report = Reconciler::reconcile(&mut tree);
        let untracked = builder
            .untracked(&root, catalog.root())
            .context("Failed to list untracked files")?;

        if ctx.is_json() {
            let untracked: Vec<String> = untracked
                .iter()
                .map(|p| relative_display(&root, p))
                .collect();
            let json = serde_json::json!({
                "provider": provider.info(),
                "root": root.display().to_string(),
                "catalog": catalog_path.display().to_string(),
                "synchronized": report.synchronized,
                "summary": report.summary,
                "untracked": untracked,
                "tree": tree,
            });
            formatter.print_json(&json);
            return Ok(());
        }

        formatter.success(&format!(
            "SyncRAG Status - {} ({})",
            provider.name(),
            provider.provider_type()
        ));
        formatter.info(&format!("Root:    {}", root.display()));
        formatter.info(&format!("Catalog: {}", catalog_path.display()));
        formatter.info("");

        for (depth, line) in tree_lines(&tree) {
            formatter.tree_line(depth, &line);
        }

        formatter.info("");
        formatter.info(&format!("Total items: {}", report.summary.total()));
        for (status, count) in report.summary.iter() {
            formatter.info(&format!("  {:<28} {}", status.as_str(), count));
        }

        if !untracked.is_empty() {
            formatter.info("");
            formatter.warn(&format!(
                "{} local item{} not in the catalog",
                untracked.len(),
                if untracked.len() == 1 { "" } else { "s" }
            ));
            for path in &untracked {
                formatter.info(&format!("  ? {}", relative_display(&root, path)));
            }
        }

        formatter.info("");
        if report.synchronized {
            formatter.success("Everything is synchronized");
        } else {
            formatter.warn("Some items are not synchronized");
        }

        Ok(())
    }
}

/// Single-character marker for a status in the tree listing
fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Synchronized => "\u{2713}",
        Status::Synchronizing => "~",
        Status::NotSynchronized => "-",
        Status::SynchronizedWithConflict => "!",
        Status::SynchronizedWithWarning => "\u{26a0}",
        Status::SynchronizedWithError => "\u{2717}",
        Status::SynchronizedWithInfo => "i",
    }
}

/// Indented listing of `tree` in pre-order, one `(depth, line)` per node
fn tree_lines(tree: &SynchronizedItem) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending = vec![(0usize, tree)];

    while let Some((depth, node)) = pending.pop() {
        let remote = node.remote();
        let suffix = if remote.is_directory() { "/" } else { "" };
        lines.push((
            depth,
            format!(
                "{} {}{}  [{}]",
                status_marker(node.status()),
                remote.name(),
                suffix,
                node.status()
            ),
        ));
        pending.extend(node.children().iter().rev().map(|c| (depth + 1, c)));
    }

    lines
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
