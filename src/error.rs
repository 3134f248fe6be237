//! Error types for the variable transfer tool.

use thiserror::Error;

/// Dispatch wiring errors.
///
/// These indicate a mismatch between what an operation declares and what the
/// registries provide. They are programming errors, never retried.
#[derive(Debug, Error)]
pub enum WiringError {
    #[error("no provider registered for input '{0}'")]
    MissingProvider(String),

    #[error("no operation registered for command '{0}'")]
    MissingOperation(String),

    #[error("input '{name}' does not have the expected type {expected}")]
    InputTypeMismatch {
        name: String,
        expected: &'static str,
    },

    #[error("input '{0}' was not resolved for this operation")]
    InputNotResolved(String),
}

/// Errors raised while loading, fetching, decoding or replaying variables.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote error: HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Wiring error: {0}")]
    Wiring(#[from] WiringError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransferError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TransferError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TransferError::Validation { .. } | TransferError::Config(_) => 2,
            TransferError::Wiring(_) => 70,
            _ => 1,
        }
    }
}

impl From<config::ConfigError> for TransferError {
    fn from(err: config::ConfigError) -> Self {
        TransferError::Config(err.to_string())
    }
}
