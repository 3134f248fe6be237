//! Provider Registry: named functions that produce the inputs operations ask for.

use crate::dispatch::arguments::ProvidedValue;
use crate::error::{TransferError, WiringError};
use crate::model::{decode_transfer_stream, Scope, Variable};
use std::any::Any;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

/// Input name of the normalized [`Scope`].
pub const SCOPE_INPUT: &str = "scope";

/// Input name of the variables decoded from the input stream.
pub const VARIABLES_INPUT: &str = "variables";

/// Everything a provider may draw on: the validated scope and the input stream.
pub struct ProviderContext<'a> {
    pub scope: &'a Scope,
    pub input: &'a mut dyn Read,
}

impl<'a> ProviderContext<'a> {
    pub fn new(scope: &'a Scope, input: &'a mut dyn Read) -> Self {
        Self { scope, input }
    }
}

type ProviderFn =
    Box<dyn Fn(&mut ProviderContext<'_>) -> Result<ProvidedValue, TransferError> + Send + Sync>;

/// Mapping from logical input name to provider.
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderFn>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registry with the `scope` and `variables` providers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SCOPE_INPUT, provide_scope);
        registry.register(VARIABLES_INPUT, provide_variables);
        registry
    }

    /// Register a provider, replacing any previous provider of the same name.
    pub fn register<T, F>(&mut self, name: impl Into<String>, provider: F)
    where
        T: Any + Send,
        F: Fn(&mut ProviderContext<'_>) -> Result<T, TransferError> + Send + Sync + 'static,
    {
        let erased: ProviderFn = Box::new(move |ctx: &mut ProviderContext<'_>| {
            provider(ctx).map(|value| Box::new(value) as ProvidedValue)
        });
        self.providers.insert(name.into(), erased);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered input names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run the provider registered under `name`.
    pub fn provide(
        &self,
        name: &str,
        ctx: &mut ProviderContext<'_>,
    ) -> Result<ProvidedValue, TransferError> {
        let provider = self
            .providers
            .get(name)
            .ok_or_else(|| WiringError::MissingProvider(name.to_string()))?;
        debug!(input = name, "Providing input");
        provider(ctx)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn provide_scope(ctx: &mut ProviderContext<'_>) -> Result<Scope, TransferError> {
    Ok(ctx.scope.clone())
}

/// Read the input stream to the end and decode it leniently.
fn provide_variables(ctx: &mut ProviderContext<'_>) -> Result<Vec<Variable>, TransferError> {
    let mut bytes = Vec::new();
    ctx.input.read_to_end(&mut bytes)?;
    let variables = decode_transfer_stream(&bytes)?;
    debug!(count = variables.len(), "Decoded variables from input stream");
    Ok(variables)
}
