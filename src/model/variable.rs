//! Variable records and the portable transfer format.
//!
//! The portable record is field-complete: every field is written, defaults included,
//! so a stream produced by `export` can be decoded losslessly by `import` running
//! in a different process against a different scope.

use crate::error::TransferError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Environment scope meaning "all environments".
pub const WILDCARD_ENVIRONMENT: &str = "*";

/// One CI/CD configuration entry.
///
/// Serializes as the portable record, in wire field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    pub variable_type: Option<String>,
    pub protected: bool,
    pub masked: bool,
    pub environment_scope: Option<String>,
}

impl Variable {
    /// Create a plain variable with all metadata at its defaults.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            variable_type: None,
            protected: false,
            masked: false,
            environment_scope: None,
        }
    }

    /// Environment scope, with absence read as the wildcard.
    pub fn effective_environment_scope(&self) -> &str {
        self.environment_scope
            .as_deref()
            .unwrap_or(WILDCARD_ENVIRONMENT)
    }
}

/// Portable record as read from a transfer stream or an API listing.
///
/// Every field is optional here; [`TryFrom`] applies the required/default rules.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortableRecord {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub variable_type: Option<String>,
    #[serde(default)]
    pub protected: Option<bool>,
    #[serde(default)]
    pub masked: Option<bool>,
    #[serde(default)]
    pub environment_scope: Option<String>,
}

impl TryFrom<PortableRecord> for Variable {
    type Error = TransferError;

    fn try_from(record: PortableRecord) -> Result<Self, Self::Error> {
        let key = record
            .key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| TransferError::validation("key", "variable record has no key"))?;
        let value = record.value.ok_or_else(|| {
            TransferError::validation("value", format!("variable '{}' has no value", key))
        })?;

        Ok(Self {
            key,
            value,
            variable_type: record.variable_type,
            protected: record.protected.unwrap_or(false),
            masked: record.masked.unwrap_or(false),
            environment_scope: record.environment_scope,
        })
    }
}

/// Decode one portable record.
pub fn decode_variable(raw: Value) -> Result<Variable, TransferError> {
    let record: PortableRecord = serde_json::from_value(raw)
        .map_err(|e| TransferError::Decode(format!("malformed variable record: {}", e)))?;
    Variable::try_from(record)
}

/// Encode a variable as its field-complete portable record.
pub fn encode_variable(variable: &Variable) -> Value {
    serde_json::json!({
        "key": variable.key,
        "value": variable.value,
        "variable_type": variable.variable_type,
        "protected": variable.protected,
        "masked": variable.masked,
        "environment_scope": variable.environment_scope,
    })
}

/// Decode a whole transfer stream.
///
/// A stream that is not a JSON array (including text that is not JSON at all)
/// yields no variables. Elements of an array are decoded strictly.
pub fn decode_transfer_stream(bytes: &[u8]) -> Result<Vec<Variable>, TransferError> {
    let document: Value = match serde_json::from_slice(bytes) {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "Transfer stream is not JSON; nothing to import");
            return Ok(Vec::new());
        }
    };

    match document {
        Value::Array(items) => items.into_iter().map(decode_variable).collect(),
        other => {
            warn!(
                kind = json_kind(&other),
                "Transfer stream is not a JSON array; nothing to import"
            );
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
