//! CLI domain: parse, route, help, and output only.
//! No transfer logic; the route hands each subcommand to the dispatcher.

mod help;
mod output;
mod parse;
mod route;

pub use help::{command_name, dispatch_command, reads_input};
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::{config_overrides, ensure_piped_input, RunContext};
