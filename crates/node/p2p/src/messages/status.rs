//! The handshake status message.

use alloy_primitives::{B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use sable_forkid::ForkId;

/// The protocol version spoken by this implementation.
pub const ETH_PROTOCOL_VERSION: u32 = 66;

/// The first message each side sends, describing its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct Status {
    /// Protocol version.
    pub version: u32,
    /// Network id.
    pub network_id: u64,
    /// Total difficulty of the head block.
    pub total_difficulty: U256,
    /// Hash of the head block.
    pub head: B256,
    /// Hash of the genesis block.
    pub genesis: B256,
    /// Fork identifier at the head block.
    pub fork_id: ForkId,
}
