//! Config command - View and check SyncRAG configuration
//!
//! Provides the `syncrag config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file and reports errors
//! 3. Prints the location of the configuration file

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use syncrag_core::config::{Config, ValidationError};
use tracing::info;

use super::CommandContext;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

/// Result of checking a configuration file on disk
#[derive(Debug)]
enum ConfigCheck {
    /// No file at the path; defaults apply
    Missing,
    /// The file exists but could not be parsed
    Unreadable(String),
    /// The file parsed; validation errors, if any
    Checked(Vec<ValidationError>),
}

fn check_config(path: &Path) -> ConfigCheck {
    if !path.exists() {
        return ConfigCheck::Missing;
    }
    match Config::load(path) {
        Ok(config) => ConfigCheck::Checked(config.validate()),
        Err(e) => ConfigCheck::Unreadable(format!("{:#}", e)),
    }
}

impl ConfigCommand {
    /// Execute the config command
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Validate => self.execute_validate(ctx),
            ConfigCommand::Path => self.execute_path(ctx),
        }
    }

    fn execute_show(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let config = ctx.load_config();

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if ctx.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    fn execute_validate(&self, ctx: &CommandContext) -> Result<()> {
        let formatter = ctx.formatter();
        let path = ctx.config_path.display().to_string();

        info!(config_path = %path, "Validating configuration");

        match check_config(&ctx.config_path) {
            ConfigCheck::Missing => {
                if ctx.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": true,
                        "config_path": path,
                        "exists": false,
                        "errors": [],
                    }));
                } else {
                    formatter.info(&format!("Configuration file not found at {}", path));
                    formatter.info("Using default configuration.");
                }
            }
            ConfigCheck::Unreadable(reason) => {
                if ctx.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": path,
                        "exists": true,
                        "errors": [format!("Failed to parse configuration: {}", reason)],
                    }));
                } else {
                    formatter.error(&format!("Failed to parse configuration: {}", reason));
                    formatter.info(&format!("File: {}", path));
                }
            }
            ConfigCheck::Checked(errors) => {
                if ctx.is_json() {
                    let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    formatter.print_json(&serde_json::json!({
                        "valid": errors.is_empty(),
                        "config_path": path,
                        "exists": true,
                        "errors": error_strings,
                    }));
                } else if errors.is_empty() {
                    formatter.success("Configuration is valid");
                    formatter.info(&format!("File: {}", path));
                } else {
                    formatter.error(&format!(
                        "Configuration has {} error{}:",
                        errors.len(),
                        if errors.len() == 1 { "" } else { "s" }
                    ));
                    formatter.info(&format!("File: {}", path));
                    formatter.info("");
                    for error in &errors {
                        formatter.info(&format!("  {} - {}", error.field, error.message));
                    }
                }
            }
        }

        Ok(())
    }

    fn execute_path(&self, ctx: &CommandContext) -> Result<()> {
        if ctx.is_json() {
            ctx.formatter().print_json(&serde_json::json!({
                "config_path": ctx.config_path.display().to_string(),
                "exists": ctx.config_path.exists(),
            }));
        } else {
            println!("{}", ctx.config_path.display());
        }
        Ok(())
    }
}
