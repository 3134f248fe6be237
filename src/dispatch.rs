//! Dispatcher
//!
//! Runs one command: resolves the operation's declared inputs against the provider
//! registry, invokes the operation, and renders its result for the output stream.
//!
//! ```text
//! Resolving ──► Invoking ──► Emitting
//!     │             │
//!     └── error ────┴──► terminal
//! ```

pub mod arguments;
pub mod commands;
pub mod output;
pub mod providers;

pub use arguments::{Arguments, ProvidedValue};
pub use commands::{
    Command, CommandRegistry, ExportOperation, ImportFailure, ImportOperation, ImportReport,
    Operation,
};
pub use output::Output;
pub use providers::{ProviderContext, ProviderRegistry, SCOPE_INPUT, VARIABLES_INPUT};

use crate::error::{TransferError, WiringError};
use tracing::{debug, error};

/// Phase of a dispatch, recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Resolving,
    Invoking,
    Emitting,
}

/// Wires commands to operations and operations to providers.
pub struct Dispatcher {
    commands: CommandRegistry,
    providers: ProviderRegistry,
}

impl Dispatcher {
    pub fn new(commands: CommandRegistry, providers: ProviderRegistry) -> Self {
        Self {
            commands,
            providers,
        }
    }

    /// Resolve every declared input of `operation`, in order.
    ///
    /// All names are checked before any provider runs, so a wiring mistake never
    /// consumes the input stream.
    pub fn resolve(
        &self,
        operation: &dyn Operation,
        ctx: &mut ProviderContext<'_>,
    ) -> Result<Arguments, TransferError> {
        let inputs = operation.inputs();
        if let Some(missing) = inputs.iter().find(|name| !self.providers.contains(name)) {
            error!(input = *missing, "Operation declares an input with no provider");
            return Err(WiringError::MissingProvider(missing.to_string()).into());
        }

        let mut arguments = Arguments::new();
        for name in inputs {
            let value = self.providers.provide(name, ctx)?;
            arguments.push(*name, value);
        }
        Ok(arguments)
    }

    /// Run `command` and return the rendered output.
    pub async fn dispatch(
        &self,
        command: Command,
        ctx: &mut ProviderContext<'_>,
    ) -> Result<String, TransferError> {
        let operation = self
            .commands
            .get(command)
            .ok_or_else(|| WiringError::MissingOperation(command.name().to_string()))?;

        debug!(%command, state = ?DispatchState::Resolving, inputs = ?operation.inputs());
        let arguments = self.resolve(operation, ctx)?;

        debug!(%command, state = ?DispatchState::Invoking);
        let output = operation.invoke(arguments).await?;

        debug!(%command, state = ?DispatchState::Emitting);
        Ok(output.render())
    }
}
