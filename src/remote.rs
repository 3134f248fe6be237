//! Remote Source
//!
//! Capability interfaces for reading variables from, and replaying variables into,
//! a scope. The GitLab client implements both; the dry-run sink implements only the
//! write side and touches nothing remote.

use crate::error::TransferError;
use crate::model::{Scope, Variable};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod gitlab;
pub mod local;

pub use gitlab::GitLabClient;
pub use local::DryRunSink;

/// Lists the variables of a scope.
#[async_trait]
pub trait VariableSource: Send + Sync {
    /// Fetch every variable of the scope in a single listing call.
    async fn list_variables(&self, scope: &Scope) -> Result<Vec<Variable>, TransferError>;

    fn source_name(&self) -> &str;
}

/// Applies one variable to a destination scope.
#[async_trait]
pub trait VariableSink: Send + Sync {
    async fn apply_variable(&self, scope: &Scope, variable: &Variable)
        -> Result<(), TransferError>;

    fn sink_name(&self) -> &str;
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("http.timeout_secs must be greater than zero".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("http.connect_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
