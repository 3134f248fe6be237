//! varsync CLI Binary
//!
//! Command-line interface for exporting and importing GitLab CI/CD variables.

use clap::Parser;
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};
use varsync::cli::{config_overrides, ensure_piped_input, map_error, Cli, RunContext};
use varsync::config::{ConfigLoader, TransferConfig};
use varsync::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(&config_overrides(&cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(e.exit_code());
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("varsync starting");

    if let Err(e) = ensure_piped_input(&cli.command, std::io::stdin().is_terminal()) {
        eprintln!("{}", map_error(&e));
        process::exit(e.exit_code());
    }

    let context = match RunContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing run context: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(e.exit_code());
        }
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    match context.execute(&cli.command, &mut input) {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(e.exit_code());
        }
    }
}

/// Build logging configuration from the loaded config and CLI flags.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &TransferConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
        // An explicit --log-output still wins below.
        if logging.output == "file" {
            logging.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}
