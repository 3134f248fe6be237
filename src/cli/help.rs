//! CLI command-name contract for routing and logs.

use crate::cli::parse::Commands;
use crate::dispatch::Command;

/// The dispatcher command behind a CLI subcommand.
pub fn dispatch_command(command: &Commands) -> Command {
    match command {
        Commands::Export => Command::Export,
        Commands::Import { .. } => Command::Import,
    }
}

/// Command name string for logs (e.g. "export", "import.dry_run").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Import { dry_run: true } => "import.dry_run".to_string(),
        other => dispatch_command(other).name().to_string(),
    }
}

/// Whether the subcommand consumes a piped variable listing.
pub fn reads_input(command: &Commands) -> bool {
    matches!(command, Commands::Import { .. })
}
