//! Explicit config file source: the path given with `--config`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// Add the explicit config file. Unlike the global file it must exist.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match path {
        Some(path) if !path.exists() => Err(ConfigError::Message(format!(
            "Configuration file not found: {}",
            path.display()
        ))),
        Some(path) => Ok(builder.add_source(File::from(path).required(true))),
        None => Ok(builder),
    }
}
