//! Scope: the connection and target descriptor for one run.

use crate::error::TransferError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unvalidated scope fields as they arrive from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawScope {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

/// Where variables are read from or written to.
///
/// Immutable after [`normalize_scope`]. `base_url` never ends in `/`.
#[derive(Clone, PartialEq, Eq)]
pub struct Scope {
    token: String,
    base_url: String,
    group: String,
    project: Option<String>,
}

/// The effective target of a scope. A project always wins over its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTarget<'a> {
    Project(&'a str),
    Group(&'a str),
}

impl Scope {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn target(&self) -> ScopeTarget<'_> {
        match self.project.as_deref() {
            Some(project) => ScopeTarget::Project(project),
            None => ScopeTarget::Group(&self.group),
        }
    }

    /// API path of the variables collection, relative to `base_url`.
    ///
    /// The identifier is form-urlencoded so a `namespace/project` slug never
    /// introduces an extra path segment.
    pub fn variables_path(&self) -> String {
        match self.target() {
            ScopeTarget::Project(project) => {
                format!("projects/{}/variables", encode_path_segment(project))
            }
            ScopeTarget::Group(group) => {
                format!("groups/{}/variables", encode_path_segment(group))
            }
        }
    }

    pub fn variables_url(&self) -> String {
        format!("{}/{}", self.base_url, self.variables_path())
    }

    /// Human-readable target for logs and messages. Never includes the token.
    pub fn display_name(&self) -> String {
        match self.target() {
            ScopeTarget::Project(project) => format!("project {}", project),
            ScopeTarget::Group(group) => format!("group {}", group),
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("group", &self.group)
            .field("project", &self.project)
            .finish()
    }
}

fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

/// Strip every trailing `/` from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Validate raw configuration into a [`Scope`].
pub fn normalize_scope(raw: &RawScope) -> Result<Scope, TransferError> {
    let group = present(&raw.group);
    let project = present(&raw.project);
    if group.is_none() && project.is_none() {
        return Err(TransferError::validation(
            "group/project",
            "one of group or project must be set",
        ));
    }

    let token = present(&raw.token)
        .ok_or_else(|| TransferError::validation("token", "must not be empty"))?;
    let base_url = present(&raw.base_url)
        .map(normalize_base_url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| TransferError::validation("base_url", "must not be empty"))?;
    let group = group.ok_or_else(|| TransferError::validation("group", "must not be empty"))?;

    Ok(Scope {
        token: token.to_string(),
        base_url,
        group: group.to_string(),
        project: project.map(str::to_string),
    })
}
