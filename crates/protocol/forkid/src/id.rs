//! Fork identifiers.

use alloy_primitives::B256;
use alloy_rlp::{RlpDecodable, RlpDecodableWrapper, RlpEncodable, RlpEncodableWrapper};
use core::fmt;
use crc32fast::Hasher;
use sable_genesis::ChainConfig;

/// A CRC-32 checksum over the genesis hash and every passed fork block number.
///
/// Stored big-endian so the RLP encoding is the four raw checksum bytes.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, RlpEncodableWrapper, RlpDecodableWrapper,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkHash(pub [u8; 4]);

impl ForkHash {
    /// Folds a fork block number into the checksum.
    pub fn add(self, fork: u64) -> Self {
        let mut hasher = Hasher::new_with_initial(u32::from_be_bytes(self.0));
        hasher.update(&fork.to_be_bytes());
        Self::from(hasher.finalize())
    }
}

impl From<B256> for ForkHash {
    fn from(genesis: B256) -> Self {
        Self::from(crc32fast::hash(genesis.as_slice()))
    }
}

impl From<u32> for ForkHash {
    fn from(checksum: u32) -> Self {
        Self(checksum.to_be_bytes())
    }
}

impl From<ForkHash> for u32 {
    fn from(hash: ForkHash) -> Self {
        Self::from_be_bytes(hash.0)
    }
}

impl fmt::Debug for ForkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForkHash({self})")
    }
}

impl fmt::Display for ForkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", u32::from(*self))
    }
}

/// A fork identifier as exchanged in the status handshake.
///
/// RLP encoded as the list `[hash, next]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkId {
    /// Checksum of the genesis hash and all passed fork blocks.
    pub hash: ForkHash,
    /// The next scheduled fork block, or `0` when nothing further is known.
    pub next: u64,
}

impl ForkId {
    /// Computes the fork identifier of a chain at the given head block.
    pub fn new(config: &ChainConfig, genesis: B256, head: u64) -> Self {
        Self::from_forks(&config.fork_blocks(), genesis, head)
    }

    /// Computes the fork identifier from an ascending list of fork block numbers.
    pub fn from_forks(forks: &[u64], genesis: B256, head: u64) -> Self {
        let mut hash = ForkHash::from(genesis);
        for &fork in forks {
            if fork > head {
                return Self { hash, next: fork };
            }
            hash = hash.add(fork);
        }
        Self { hash, next: 0 }
    }
}

impl fmt::Display for ForkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hash, self.next)
    }
}
