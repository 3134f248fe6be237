//! Configuration System
//!
//! Layered configuration for a transfer run: merge-policy defaults, the user's global
//! config file, an explicit `--config` file, `VARSYNC_*` environment variables and
//! finally command-line flags. The result is validated once and then normalized into
//! a [`Scope`] before any command runs.

use crate::error::TransferError;
use crate::logging::LoggingConfig;
use crate::model::{normalize_scope, RawScope, Scope};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::remote::HttpSettings;

mod facade;
mod merge;
mod sources;

pub use facade::{ConfigLoader, ConfigOverrides};
pub use sources::environment::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Connection and target (token, base URL, group, project)
    #[serde(default)]
    pub gitlab: RawScope,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Http(String),
    Logging(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Http(msg) => write!(f, "HTTP: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TransferConfig {
    /// Validate the settings sections. Scope fields are checked by [`Self::scope`].
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.http.validate() {
            errors.push(ValidationError::Http(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Normalize the gitlab section into the run's scope.
    pub fn scope(&self) -> Result<Scope, TransferError> {
        normalize_scope(&self.gitlab)
    }
}
