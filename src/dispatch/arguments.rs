//! Resolved operation inputs.

use crate::error::{TransferError, WiringError};
use std::any::Any;

/// A provider's output, type-erased until the operation takes it.
pub type ProvidedValue = Box<dyn Any + Send>;

/// Inputs resolved for one invocation, in the operation's declared order.
#[derive(Default)]
pub struct Arguments {
    values: Vec<(String, ProvidedValue)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: ProvidedValue) {
        self.values.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Input names in resolution order.
    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Remove the input called `name` and recover its concrete type.
    pub fn take<T: Any>(&mut self, name: &str) -> Result<T, TransferError> {
        let index = self
            .values
            .iter()
            .position(|(candidate, _)| candidate == name)
            .ok_or_else(|| WiringError::InputNotResolved(name.to_string()))?;
        let (name, value) = self.values.remove(index);
        value.downcast::<T>().map(|value| *value).map_err(|_| {
            WiringError::InputTypeMismatch {
                name,
                expected: std::any::type_name::<T>(),
            }
            .into()
        })
    }
}
