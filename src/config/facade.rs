//! ConfigLoader: assembles the layered configuration for one run.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::TransferConfig;
use crate::error::TransferError;
use std::path::{Path, PathBuf};

/// Values supplied on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub group: Option<String>,
    pub project: Option<String>,
    pub timeout_secs: Option<u64>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, global file, explicit file, environment and overrides, in
    /// that order of increasing precedence.
    pub fn load(overrides: &ConfigOverrides) -> Result<TransferConfig, TransferError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = explicit_file::add_to_builder(builder, overrides.config_file.as_deref())?;
        let builder = environment::add_to_builder(builder)?;
        let builder = builder
            .set_override_option("gitlab.token", overrides.token.clone())?
            .set_override_option("gitlab.base_url", overrides.base_url.clone())?
            .set_override_option("gitlab.group", overrides.group.clone())?
            .set_override_option("gitlab.project", overrides.project.clone())?
            .set_override_option(
                "http.timeout_secs",
                overrides.timeout_secs.map(|secs| secs as i64),
            )?;

        let config: TransferConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TransferError::Config(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(config)
    }

    /// Load a single file over the defaults, ignoring every other source.
    pub fn load_from_file(path: &Path) -> Result<TransferConfig, TransferError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = explicit_file::add_to_builder(builder, Some(path))?;
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
