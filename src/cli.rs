//! Command-line argument parsing for the console
//!
//! Supports:
//! - An alternative config file
//! - Running a script of shell commands before (or instead of) the prompt
//! - Disabling the layout journal
//! - Overriding the program name shown in window titles

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConsoleConfig;

/// Robotics control console
#[derive(Parser, Debug)]
#[command(name = "spooky", version, about = "Dockable-widget robotics console")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/spooky-console/config.yaml
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run the commands in FILE before reading from stdin
    #[arg(short = 's', long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Do not append layout changes to the journal
    #[arg(long)]
    pub no_journal: bool,

    /// Name shown in window titles
    #[arg(long, value_name = "NAME")]
    pub prog_name: Option<String>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub console: ConsoleConfig,
    pub script: Option<PathBuf>,
}

impl CliArgs {
    /// Load the config file the arguments point at and apply the overrides
    pub fn into_config(self) -> StartupConfig {
        let console = match &self.config {
            Some(path) => ConsoleConfig::load_from(path),
            None => ConsoleConfig::load(),
        };
        self.apply(console)
    }

    /// Apply the command-line overrides on top of `console`
    pub fn apply(self, mut console: ConsoleConfig) -> StartupConfig {
        if self.no_journal {
            console.journal.enabled = false;
        }
        if let Some(name) = self.prog_name {
            console.prog_name = name;
        }
        StartupConfig {
            console,
            script: self.script,
        }
    }
}
