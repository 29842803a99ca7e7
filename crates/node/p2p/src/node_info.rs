//! Local node summary.

use alloy_primitives::{B256, U256};
use sable_genesis::ChainConfig;
use sable_protocol::ChainReader;
use serde::{Deserialize, Serialize};

/// What the local node reports about its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Network id.
    pub network: u64,
    /// Total difficulty of the head block.
    pub difficulty: U256,
    /// Hash of the genesis block.
    pub genesis: B256,
    /// The fork schedule.
    pub config: ChainConfig,
    /// Hash of the head block.
    pub head: B256,
}

impl NodeInfo {
    /// Summarizes the current state of `chain`.
    pub fn new<C: ChainReader>(chain: &C, network: u64, genesis: B256, config: ChainConfig) -> Self {
        let head = chain.current_header().hash_slow();
        Self {
            network,
            difficulty: chain.total_difficulty(head).unwrap_or_default(),
            genesis,
            config,
            head,
        }
    }
}
