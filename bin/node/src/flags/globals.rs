//! Global arguments for the CLI.

use alloy_primitives::B256;
use clap::Parser;
use sable_cli::{LogArgs, load_chain_config};
use sable_genesis::{ChainConfig, MAINNET_GENESIS_HASH};
use std::path::PathBuf;

/// Global arguments for the CLI.
#[derive(Parser, Clone, Debug)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// Path to a JSON or TOML chain config. The built-in schedule of the genesis is used
    /// when omitted.
    #[arg(long, global = true, env = "SABLE_CHAIN_CONFIG")]
    pub chain_config: Option<PathBuf>,
    /// The genesis block hash.
    #[arg(long, global = true, env = "SABLE_GENESIS", default_value_t = MAINNET_GENESIS_HASH)]
    pub genesis: B256,
}

impl GlobalArgs {
    /// Returns the fork schedule to use, checking its fork ordering.
    pub fn chain_config(&self) -> anyhow::Result<ChainConfig> {
        let config = match &self.chain_config {
            Some(path) => load_chain_config(path)?,
            None => ChainConfig::for_genesis(self.genesis).ok_or_else(|| {
                anyhow::anyhow!("No built-in chain config for genesis {}", self.genesis)
            })?,
        };
        config.check_fork_order()?;
        Ok(config)
    }
}
