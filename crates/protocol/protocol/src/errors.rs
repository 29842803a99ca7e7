//! Block validation errors.

use alloy_primitives::{B256, Bloom};
use thiserror::Error;

/// Uncle verification failures reported by a [`crate::ConsensusEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    /// The block carries more uncles than allowed.
    #[error("too many uncles: {count} > {max}")]
    TooManyUncles {
        /// Number of uncles in the block.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// The same uncle is included twice.
    #[error("duplicate uncle {0}")]
    DuplicateUncle(B256),
    /// The uncle is an ancestor of the block.
    #[error("uncle {0} is an ancestor")]
    UncleIsAncestor(B256),
    /// The uncle's parent is not a recent ancestor of the block.
    #[error("uncle {0}'s parent is not an ancestor")]
    DanglingUncle(B256),
    /// The uncle header itself is invalid.
    #[error("invalid uncle {hash}: {reason}")]
    InvalidUncle {
        /// Hash of the uncle.
        hash: B256,
        /// What the engine rejected.
        reason: String,
    },
}

/// A block failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The block is already known with state.
    #[error("block {number} ({hash}) already known")]
    KnownBlock {
        /// Hash of the block.
        hash: B256,
        /// Number of the block.
        number: u64,
    },
    /// The parent of the block has never been seen.
    #[error("unknown ancestor {parent} of block {block}")]
    UnknownAncestor {
        /// Hash of the missing parent.
        parent: B256,
        /// Number of the block being validated.
        block: u64,
    },
    /// The parent of the block is known but its state has been pruned.
    #[error("pruned ancestor {parent} of block {block}")]
    PrunedAncestor {
        /// Hash of the parent.
        parent: B256,
        /// Number of the block being validated.
        block: u64,
    },
    /// The uncle root does not match the uncles.
    #[error("uncle root hash mismatch: have {computed}, want {expected}")]
    UncleRootMismatch {
        /// Root declared in the header.
        expected: B256,
        /// Root derived from the uncles.
        computed: B256,
    },
    /// The transaction root does not match the transactions.
    #[error("transaction root hash mismatch: have {computed}, want {expected}")]
    TxRootMismatch {
        /// Root declared in the header.
        expected: B256,
        /// Root derived from the transactions.
        computed: B256,
    },
    /// The receipt root does not match the execution receipts.
    #[error("invalid receipt root hash (remote: {expected} local: {computed})")]
    ReceiptRootMismatch {
        /// Root declared in the header.
        expected: B256,
        /// Root derived from the receipts.
        computed: B256,
    },
    /// The state root does not match the post-execution state.
    #[error("invalid merkle root (remote: {expected} local: {computed})")]
    StateRootMismatch {
        /// Root declared in the header.
        expected: B256,
        /// Root of the executed state.
        computed: B256,
    },
    /// The logs bloom does not match the execution receipts.
    #[error("invalid bloom (remote: {expected} local: {computed})")]
    BloomMismatch {
        /// Bloom declared in the header.
        expected: Box<Bloom>,
        /// Bloom derived from the receipts.
        computed: Box<Bloom>,
    },
    /// The gas used does not match execution.
    #[error("invalid gas used (remote: {expected} local: {used})")]
    GasUsedMismatch {
        /// Gas used declared in the header.
        expected: u64,
        /// Gas used reported by execution.
        used: u64,
    },
    /// The consensus engine rejected the uncles.
    #[error(transparent)]
    Consensus(#[from] ConsensusError),
}

impl ValidationError {
    /// Returns true for a duplicate block, which is neither a fault of the sender nor worth
    /// reporting.
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::KnownBlock { .. })
    }

    /// Returns true if the block may validate once the missing ancestor or its state is
    /// available.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UnknownAncestor { .. } | Self::PrunedAncestor { .. })
    }

    /// Returns true if the block is invalid and the peer that sent it should be penalized.
    pub const fn should_penalize_peer(&self) -> bool {
        !self.is_benign() && !self.is_retryable()
    }

    /// A short label naming the failure, used for metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::KnownBlock { .. } => "known_block",
            Self::UnknownAncestor { .. } => "unknown_ancestor",
            Self::PrunedAncestor { .. } => "pruned_ancestor",
            Self::UncleRootMismatch { .. } => "uncle_root",
            Self::TxRootMismatch { .. } => "tx_root",
            Self::ReceiptRootMismatch { .. } => "receipt_root",
            Self::StateRootMismatch { .. } => "state_root",
            Self::BloomMismatch { .. } => "bloom",
            Self::GasUsedMismatch { .. } => "gas_used",
            Self::Consensus(_) => "consensus",
        }
    }
}
