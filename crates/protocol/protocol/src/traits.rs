//! Collaborators the validator and the protocol handler read the chain through.

use crate::{Block, ConsensusError, Receipt};
use alloy_consensus::Header;
use alloy_primitives::{B256, Bytes, U256};
use auto_impl::auto_impl;

/// Read access to the local chain.
///
/// Implementations hand back a point-in-time view and must be safe to share between peer
/// sessions.
#[auto_impl(&, Arc)]
pub trait ChainReader {
    /// Returns true if the block is known and its state is available.
    fn has_block_with_state(&self, hash: B256, number: u64) -> bool;

    /// Returns true if the block is known, regardless of state availability.
    fn has_block(&self, hash: B256, number: u64) -> bool;

    /// Returns the block with the given hash, canonical or not.
    fn block_by_hash(&self, hash: B256) -> Option<Block>;

    /// Returns the canonical block at the given height.
    fn block_by_number(&self, number: u64) -> Option<Block>;

    /// Returns the hash of the canonical block at the given height.
    fn canonical_hash(&self, number: u64) -> Option<B256>;

    /// Returns the header of the current canonical head.
    fn current_header(&self) -> Header;

    /// Returns the receipts of the block with the given hash, empty if unknown.
    fn receipts_by_hash(&self, hash: B256) -> Vec<Receipt>;

    /// Returns the header of the block with the given hash.
    fn header_by_hash(&self, hash: B256) -> Option<Header> {
        self.block_by_hash(hash).map(|block| block.header)
    }

    /// Returns the header with the given hash only if it sits at the given height.
    fn header(&self, hash: B256, number: u64) -> Option<Header> {
        self.header_by_hash(hash).filter(|header| header.number == number)
    }

    /// Returns the header of the canonical block at the given height.
    fn header_by_number(&self, number: u64) -> Option<Header> {
        self.canonical_hash(number).and_then(|hash| self.header_by_hash(hash))
    }

    /// Returns the total difficulty of the chain up to and including the given block.
    fn total_difficulty(&self, _hash: B256) -> Option<U256> {
        None
    }

    /// Returns the hash and number of the block `ancestor` generations above the given one.
    ///
    /// Once the walk reaches the canonical chain it jumps straight to the target. Every
    /// step taken on a side chain consumes one unit of `max_non_canonical`; the walk gives
    /// up when the budget runs out.
    fn ancestor(
        &self,
        mut hash: B256,
        mut number: u64,
        mut ancestor: u64,
        max_non_canonical: &mut u64,
    ) -> Option<(B256, u64)> {
        if ancestor > number {
            return None;
        }
        if ancestor == 1 {
            return self.header(hash, number).map(|header| (header.parent_hash, number - 1));
        }
        while ancestor != 0 {
            if self.canonical_hash(number) == Some(hash) {
                let target = number - ancestor;
                return self.canonical_hash(target).map(|hash| (hash, target));
            }
            if *max_non_canonical == 0 {
                return None;
            }
            *max_non_canonical -= 1;
            ancestor -= 1;
            hash = self.header(hash, number)?.parent_hash;
            number -= 1;
        }
        Some((hash, number))
    }
}

/// Read access to state trie nodes and contract code.
#[auto_impl(&, Arc)]
pub trait StateReader {
    /// Returns the trie node or contract code with the given hash.
    fn node_data(&self, hash: B256) -> Option<Bytes>;
}

/// The consensus rules a block's uncles are checked against.
#[auto_impl(&, Arc)]
pub trait ConsensusEngine {
    /// Verifies that the uncles of `block` conform to the consensus rules.
    fn verify_uncles(&self, chain: &dyn ChainReader, block: &Block) -> Result<(), ConsensusError>;
}
