//! Operation results and how they are emitted.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// What an operation hands back to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Nothing to print
    Empty,
    /// Written verbatim
    Text(String),
    /// Pretty-printed as JSON
    Structured(Value),
}

impl Output {
    /// Capture a serializable value, falling back to its Debug text when it
    /// cannot be represented as JSON.
    pub fn structured<T>(value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(value) => Output::Structured(value),
            Err(e) => {
                debug!(error = %e, "Value is not JSON-serializable; emitting as text");
                Output::Text(format!("{:?}", value))
            }
        }
    }

    /// Render for the output stream. JSON uses two-space indentation.
    pub fn render(&self) -> String {
        match self {
            Output::Empty => String::new(),
            Output::Text(text) => text.clone(),
            Output::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<()> for Output {
    fn from(_: ()) -> Self {
        Output::Empty
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Output::Text(text)
    }
}
