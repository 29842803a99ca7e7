//! Chain configuration file loading.

use crate::{CliError, CliResult};
use sable_genesis::ChainConfig;
use std::path::Path;

/// Loads a [`ChainConfig`] from a JSON or TOML file, picked by extension.
///
/// A JSON genesis file whose chain configuration sits under a top-level `config` key is
/// accepted as well.
pub fn load_chain_config(path: &Path) -> CliResult<ChainConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| CliError::ReadChainConfig { path: path.to_path_buf(), source })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let value: serde_json::Value = serde_json::from_str(&contents)?;
            let config = value.get("config").cloned().unwrap_or(value);
            Ok(serde_json::from_value(config)?)
        }
        Some("toml") => Ok(toml::from_str(&contents)?),
        _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
    }
}
