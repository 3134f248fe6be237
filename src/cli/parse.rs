//! CLI parse: clap types for varsync. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// varsync - move GitLab CI/CD variables between projects and groups
#[derive(Parser)]
#[command(name = "varsync", version)]
#[command(about = "Export and import GitLab CI/CD variables")]
#[command(
    after_help = "Transfer variables: varsync --project old/app export | varsync --project new/app import"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GitLab access token (sent as PRIVATE-TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// GitLab API base URL, e.g. https://gitlab.com/api/v4
    #[arg(long = "url")]
    pub base_url: Option<String>,

    /// Group ID or full path
    #[arg(long)]
    pub group: Option<String>,

    /// Project ID or full path; takes precedence over --group
    #[arg(long)]
    pub project: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose logging to stderr
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the scope's variables to stdout as JSON
    Export,
    /// Read a variable listing from stdin and apply it to the scope
    Import {
        /// Report what would be applied without calling the API
        #[arg(long)]
        dry_run: bool,
    },
}
