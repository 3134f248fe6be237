//! CLI route: run context and the single route from subcommand to dispatcher.

use crate::cli::help::{command_name, dispatch_command, reads_input};
use crate::cli::parse::{Cli, Commands};
use crate::config::{ConfigOverrides, TransferConfig};
use crate::dispatch::{CommandRegistry, Dispatcher, ProviderContext, ProviderRegistry};
use crate::error::TransferError;
use crate::model::Scope;
use crate::remote::{DryRunSink, GitLabClient, VariableSink, VariableSource};
use std::io::Read;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

/// Config overrides taken from command-line flags.
pub fn config_overrides(cli: &Cli) -> ConfigOverrides {
    ConfigOverrides {
        config_file: cli.config.clone(),
        token: cli.token.clone(),
        base_url: cli.base_url.clone(),
        group: cli.group.clone(),
        project: cli.project.clone(),
        timeout_secs: cli.timeout,
    }
}

/// Refuse to run a stdin-consuming command against an interactive terminal.
pub fn ensure_piped_input(
    command: &Commands,
    stdin_is_terminal: bool,
) -> Result<(), TransferError> {
    if reads_input(command) && stdin_is_terminal {
        return Err(TransferError::validation(
            "stdin",
            format!("{} expects a variable listing piped on stdin", command_name(command)),
        ));
    }
    Ok(())
}

/// Runtime context for CLI execution: validated config, the run's scope, and the
/// single-threaded runtime HTTP calls are driven on.
pub struct RunContext {
    config: TransferConfig,
    scope: Scope,
    runtime: Runtime,
}

impl RunContext {
    /// Normalize the scope and build the runtime. Fails before any command runs if
    /// the scope is incomplete.
    pub fn new(config: TransferConfig) -> Result<Self, TransferError> {
        let scope = config.scope()?;
        let runtime = Builder::new_current_thread().enable_all().build()?;
        info!(
            target_scope = %scope.display_name(),
            base_url = %scope.base_url(),
            "Run context initialized"
        );
        Ok(Self {
            config,
            scope,
            runtime,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Execute a CLI command, reading any piped listing from `input`.
    pub fn execute(
        &self,
        command: &Commands,
        input: &mut dyn Read,
    ) -> Result<String, TransferError> {
        info!(command = %command_name(command), "Executing command");
        let dispatcher = self.dispatcher_for(command)?;
        let mut ctx = ProviderContext::new(&self.scope, input);
        self.runtime
            .block_on(dispatcher.dispatch(dispatch_command(command), &mut ctx))
    }

    fn dispatcher_for(&self, command: &Commands) -> Result<Dispatcher, TransferError> {
        let client = Arc::new(GitLabClient::new(&self.config.http)?);
        let source: Arc<dyn VariableSource> = client.clone();
        let sink: Arc<dyn VariableSink> = match command {
            Commands::Import { dry_run: true } => Arc::new(DryRunSink),
            _ => client,
        };
        Ok(Dispatcher::new(
            CommandRegistry::with_transfer_operations(source, sink),
            ProviderRegistry::with_defaults(),
        ))
    }
}
