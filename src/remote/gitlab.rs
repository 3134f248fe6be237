//! GitLab CI/CD variables API client.

use crate::error::TransferError;
use crate::model::{decode_variable, Scope, Variable};
use crate::remote::{HttpSettings, VariableSink, VariableSource};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Authentication header carrying the scope token.
pub const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Request body for creating a variable. Absent optionals are left to the
/// server's defaults.
#[derive(Debug, Serialize)]
struct CreateVariableRequest<'a> {
    key: &'a str,
    value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variable_type: Option<&'a str>,
    protected: bool,
    masked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    environment_scope: Option<&'a str>,
}

impl<'a> From<&'a Variable> for CreateVariableRequest<'a> {
    fn from(variable: &'a Variable) -> Self {
        Self {
            key: &variable.key,
            value: &variable.value,
            variable_type: variable.variable_type.as_deref(),
            protected: variable.protected,
            masked: variable.masked,
            environment_scope: variable.environment_scope.as_deref(),
        }
    }
}

fn map_http_error(error: reqwest::Error) -> TransferError {
    if error.is_timeout() {
        TransferError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        TransferError::Transport(format!("Connection error: {}", error))
    } else {
        TransferError::Transport(format!("HTTP error: {}", error))
    }
}

/// Turn a non-2xx response into a [`TransferError::Remote`].
async fn ensure_success(response: Response) -> Result<Response, TransferError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransferError::Remote {
        status: status.as_u16(),
        body,
    })
}

/// Decode a listing body: a flat JSON array of variable objects.
pub fn decode_listing(body: &[u8]) -> Result<Vec<Variable>, TransferError> {
    let document: Value = serde_json::from_slice(body)
        .map_err(|e| TransferError::Decode(format!("variable listing is not JSON: {}", e)))?;
    let items = match document {
        Value::Array(items) => items,
        _ => {
            return Err(TransferError::Decode(
                "variable listing is not a JSON array".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(TransferError::Decode(format!(
                    "variable listing entry {} is not an object",
                    index
                )));
            }
            if is_hidden_without_value(&item) {
                let key = item.get("key").and_then(Value::as_str).unwrap_or_default();
                return Err(TransferError::validation(
                    "value",
                    format!(
                        "variable '{}' is hidden; GitLab does not return its value, so it \
                         cannot be exported",
                        key
                    ),
                ));
            }
            decode_variable(item)
        })
        .collect()
}

/// Hidden variables are listed with `"value": null`.
fn is_hidden_without_value(item: &Value) -> bool {
    item.get("hidden").and_then(Value::as_bool).unwrap_or(false)
        && item.get("value").map_or(true, Value::is_null)
}

/// GitLab REST client for project and group variables.
pub struct GitLabClient {
    client: Client,
}

impl GitLabClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, TransferError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| {
                TransferError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl VariableSource for GitLabClient {
    async fn list_variables(&self, scope: &Scope) -> Result<Vec<Variable>, TransferError> {
        let url = scope.variables_url();
        debug!(target_scope = %scope.display_name(), url = %url, "Listing variables");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, scope.token())
            .send()
            .await
            .map_err(map_http_error)?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(map_http_error)?;

        let variables = decode_listing(&body)?;
        info!(
            target_scope = %scope.display_name(),
            count = variables.len(),
            "Listed variables"
        );
        Ok(variables)
    }

    fn source_name(&self) -> &str {
        "gitlab"
    }
}

#[async_trait]
impl VariableSink for GitLabClient {
    async fn apply_variable(
        &self,
        scope: &Scope,
        variable: &Variable,
    ) -> Result<(), TransferError> {
        let url = scope.variables_url();
        debug!(target_scope = %scope.display_name(), key = %variable.key, "Creating variable");

        let response = self
            .client
            .post(&url)
            .header(TOKEN_HEADER, scope.token())
            .json(&CreateVariableRequest::from(variable))
            .send()
            .await
            .map_err(map_http_error)?;
        ensure_success(response).await?;
        Ok(())
    }

    fn sink_name(&self) -> &str {
        "gitlab"
    }
}
