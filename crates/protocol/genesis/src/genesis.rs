//! Genesis constants of the built-in networks.

use alloy_primitives::{B256, b256};

/// Hash of the Ethereum mainnet genesis block.
pub const MAINNET_GENESIS_HASH: B256 =
    b256!("0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3");
