//! Command Registry: the `export` and `import` operations and their declared inputs.

use crate::dispatch::arguments::Arguments;
use crate::dispatch::output::Output;
use crate::dispatch::providers::{SCOPE_INPUT, VARIABLES_INPUT};
use crate::error::TransferError;
use crate::model::{Scope, Variable};
use crate::remote::{VariableSink, VariableSource};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// A command the dispatcher can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Export,
    Import,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::Export, Command::Import];

    pub fn name(self) -> &'static str {
        match self {
            Command::Export => "export",
            Command::Import => "import",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = TransferError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == name)
            .ok_or_else(|| {
                TransferError::validation("command", format!("unknown command '{}'", name))
            })
    }
}

/// The logic behind a command.
///
/// `inputs` is the operation's only coupling to input resolution: the dispatcher
/// resolves each name against the provider registry, in order.
#[async_trait]
pub trait Operation: Send + Sync {
    fn inputs(&self) -> &[&'static str];

    async fn invoke(&self, arguments: Arguments) -> Result<Output, TransferError>;
}

/// Lists the scope's variables.
pub struct ExportOperation {
    source: Arc<dyn VariableSource>,
}

impl ExportOperation {
    const INPUTS: &'static [&'static str] = &[SCOPE_INPUT];

    pub fn new(source: Arc<dyn VariableSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Operation for ExportOperation {
    fn inputs(&self) -> &[&'static str] {
        Self::INPUTS
    }

    async fn invoke(&self, mut arguments: Arguments) -> Result<Output, TransferError> {
        let scope: Scope = arguments.take(SCOPE_INPUT)?;
        let variables = self.source.list_variables(&scope).await?;
        info!(
            source = self.source.source_name(),
            count = variables.len(),
            "Exported variables"
        );
        Ok(Output::structured(&variables))
    }
}

/// One variable that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub key: String,
    pub reason: String,
}

/// Per-variable outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn record_success(&mut self, key: &str) {
        self.succeeded.push(key.to_string());
    }

    pub fn record_failure(&mut self, key: &str, reason: impl Into<String>) {
        self.failed.push(ImportFailure {
            key: key.to_string(),
            reason: reason.into(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Applies each variable to the scope, continuing past individual failures.
pub struct ImportOperation {
    sink: Arc<dyn VariableSink>,
}

impl ImportOperation {
    const INPUTS: &'static [&'static str] = &[SCOPE_INPUT, VARIABLES_INPUT];

    pub fn new(sink: Arc<dyn VariableSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Operation for ImportOperation {
    fn inputs(&self) -> &[&'static str] {
        Self::INPUTS
    }

    async fn invoke(&self, mut arguments: Arguments) -> Result<Output, TransferError> {
        let scope: Scope = arguments.take(SCOPE_INPUT)?;
        let variables: Vec<Variable> = arguments.take(VARIABLES_INPUT)?;

        let mut report = ImportReport::default();
        for variable in &variables {
            match self.sink.apply_variable(&scope, variable).await {
                Ok(()) => report.record_success(&variable.key),
                Err(e) => {
                    warn!(key = %variable.key, error = %e, "Failed to apply variable");
                    report.record_failure(&variable.key, e.to_string());
                }
            }
        }

        if report.is_clean() {
            info!(
                sink = self.sink.sink_name(),
                target_scope = %scope.display_name(),
                succeeded = report.succeeded.len(),
                "Import finished"
            );
        } else {
            warn!(
                sink = self.sink.sink_name(),
                target_scope = %scope.display_name(),
                succeeded = report.succeeded.len(),
                failed = report.failed.len(),
                "Import finished with failures"
            );
        }
        Ok(Output::structured(&report))
    }
}

/// Mapping from command to operation, built once at startup.
pub struct CommandRegistry {
    operations: HashMap<Command, Box<dyn Operation>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Registry with `export` reading from `source` and `import` writing to `sink`.
    pub fn with_transfer_operations(
        source: Arc<dyn VariableSource>,
        sink: Arc<dyn VariableSink>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Command::Export, ExportOperation::new(source));
        registry.register(Command::Import, ImportOperation::new(sink));
        registry
    }

    pub fn register(&mut self, command: Command, operation: impl Operation + 'static) {
        self.operations.insert(command, Box::new(operation));
    }

    pub fn get(&self, command: Command) -> Option<&dyn Operation> {
        self.operations.get(&command).map(|operation| operation.as_ref())
    }

    /// Look up an operation by command name.
    pub fn get_by_name(&self, name: &str) -> Option<&dyn Operation> {
        name.parse::<Command>().ok().and_then(|command| self.get(command))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
