//! SyncRAG CLI - Command-line interface for SyncRAG
//!
//! Provides commands for:
//! - Viewing the synchronization status of a local tree against its catalog
//! - Listing the registered RAG providers
//! - Inspecting and validating configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use syncrag_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand, config::ConfigCommand, providers::ProvidersCommand,
    status::StatusCommand, CommandContext,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "syncrag",
    version,
    about = "Keep a local folder in step with a RAG knowledge base"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show synchronization status
    Status(StatusCommand),
    /// List registered RAG providers
    Providers(ProvidersCommand),
    /// View and check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Log filter for the given flags, falling back to `logging.level`
fn log_filter(verbose: u8, quiet: bool, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let configured_level = Config::load_or_default(&config_path).logging.level;

    // Setup tracing; logs go to stderr so JSON output stays parseable
    let filter = log_filter(cli.verbose, cli.quiet, &configured_level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let ctx = CommandContext {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        },
        quiet: cli.quiet,
        config_path,
    };

    let result = match &cli.command {
        Commands::Status(cmd) => cmd.execute(&ctx),
        Commands::Providers(cmd) => cmd.execute(&ctx),
        Commands::Config(cmd) => cmd.execute(&ctx),
        Commands::Completions(cmd) => cmd.execute(&ctx),
    };

    if let Err(e) = &result {
        ctx.formatter().error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
