//! CLI definitions for a11ylens.

use std::path::PathBuf;

use a11ylens_protocols::BrowserKind;
use clap::{Parser, Subcommand};

/// a11ylens CLI.
#[derive(Parser)]
#[command(name = "a11ylens")]
#[command(about = "Component-aware accessibility scanner for React applications")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.a11ylens/config.toml)
    #[arg(short, long, global = true, env = "A11YLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan a page and print the JSON report
    Scan {
        /// Page to scan (http://, https:// or file://)
        url: String,

        /// Browser engine (chromium, firefox, webkit)
        #[arg(short, long)]
        browser: Option<BrowserKind>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Rule tags to run, comma separated
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Validate the configuration file
    Check,
}
