//! CLI subcommands
//!
//! Every command receives a [`CommandContext`] carrying the global flags.

pub mod completions;
pub mod config;
pub mod providers;
pub mod status;

use std::path::PathBuf;

use syncrag_core::config::Config;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Global options shared by all subcommands
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub format: OutputFormat,
    pub quiet: bool,
    /// Configuration file in effect (`--config` or the platform default)
    pub config_path: PathBuf,
}

impl CommandContext {
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format, self.quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Configuration from `config_path`, or defaults if it cannot be read
    pub fn load_config(&self) -> Config {
        Config::load_or_default(&self.config_path)
    }
}
