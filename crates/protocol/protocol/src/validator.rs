//! Block body and post-execution state validation.

use crate::{Block, ChainReader, ConsensusEngine, Receipt, ValidationError, create_bloom};
use alloy_consensus::{
    Header,
    proofs::{calculate_ommers_root, calculate_receipt_root, calculate_transaction_root},
};
use alloy_primitives::B256;

/// Validates blocks against the local chain before and after execution.
///
/// The validator holds no mutable state and can be shared between import workers.
#[derive(Debug, Clone)]
pub struct BlockValidator<C, E> {
    chain: C,
    engine: E,
}

impl<C, E> BlockValidator<C, E>
where
    C: ChainReader,
    E: ConsensusEngine,
{
    /// Creates a validator reading through `chain` and checking uncles with `engine`.
    pub const fn new(chain: C, engine: E) -> Self {
        Self { chain, engine }
    }

    /// Returns the chain reader.
    pub const fn chain(&self) -> &C {
        &self.chain
    }

    /// Validates a block whose header has already been verified, before executing it.
    pub fn validate_body(&self, block: &Block) -> Result<(), ValidationError> {
        let result = self.check_body(block);
        match &result {
            Ok(()) => {
                sable_macros::inc!(counter, crate::Metrics::BODY_VALIDATED);
            }
            Err(err) => Self::record_failure(&block.header, err),
        }
        result
    }

    /// Validates the outcome of executing `block`: the state root computed by the
    /// executor, its receipts and the gas it used.
    ///
    /// The gas used is checked first. The logs bloom is then derived from the receipts on a
    /// concurrent task while the root checks run; a bloom mismatch takes precedence over a
    /// root mismatch.
    pub fn validate_state(
        &self,
        block: &Block,
        state_root: B256,
        receipts: &[Receipt],
        used_gas: u64,
    ) -> Result<(), ValidationError> {
        let result = Self::check_state(&block.header, state_root, receipts, used_gas);
        match &result {
            Ok(()) => {
                sable_macros::inc!(counter, crate::Metrics::STATE_VALIDATED);
            }
            Err(err) => Self::record_failure(&block.header, err),
        }
        result
    }

    fn check_body(&self, block: &Block) -> Result<(), ValidationError> {
        let header = &block.header;
        let hash = header.hash_slow();
        if self.chain.has_block_with_state(hash, header.number) {
            return Err(ValidationError::KnownBlock { hash, number: header.number });
        }

        self.engine.verify_uncles(&self.chain, block)?;

        let computed = calculate_ommers_root(&block.body.ommers);
        if computed != header.ommers_hash {
            return Err(ValidationError::UncleRootMismatch { expected: header.ommers_hash, computed });
        }

        let computed = calculate_transaction_root(&block.body.transactions);
        if computed != header.transactions_root {
            return Err(ValidationError::TxRootMismatch {
                expected: header.transactions_root,
                computed,
            });
        }

        let parent = header.parent_hash;
        let Some(parent_number) = header.number.checked_sub(1) else {
            return Err(ValidationError::UnknownAncestor { parent, block: header.number });
        };
        if !self.chain.has_block_with_state(parent, parent_number) {
            if !self.chain.has_block(parent, parent_number) {
                return Err(ValidationError::UnknownAncestor { parent, block: header.number });
            }
            return Err(ValidationError::PrunedAncestor { parent, block: header.number });
        }
        Ok(())
    }

    fn check_state(
        header: &Header,
        state_root: B256,
        receipts: &[Receipt],
        used_gas: u64,
    ) -> Result<(), ValidationError> {
        if header.gas_used != used_gas {
            return Err(ValidationError::GasUsedMismatch { expected: header.gas_used, used: used_gas });
        }

        let (roots, bloom) = rayon::join(
            || Self::check_roots(header, state_root, receipts),
            || create_bloom(receipts),
        );

        if bloom != header.logs_bloom {
            return Err(ValidationError::BloomMismatch {
                expected: Box::new(header.logs_bloom),
                computed: Box::new(bloom),
            });
        }
        roots
    }

    fn check_roots(
        header: &Header,
        state_root: B256,
        receipts: &[Receipt],
    ) -> Result<(), ValidationError> {
        let computed = calculate_receipt_root(receipts);
        if computed != header.receipts_root {
            return Err(ValidationError::ReceiptRootMismatch {
                expected: header.receipts_root,
                computed,
            });
        }
        if state_root != header.state_root {
            return Err(ValidationError::StateRootMismatch {
                expected: header.state_root,
                computed: state_root,
            });
        }
        Ok(())
    }

    fn record_failure(header: &Header, err: &ValidationError) {
        if err.is_benign() {
            trace!(target: "validator", number = header.number, "Skipping known block");
            return;
        }
        if err.is_retryable() {
            debug!(target: "validator", number = header.number, %err, "Block ancestor unavailable");
        } else {
            warn!(target: "validator", number = header.number, %err, "Invalid block");
        }
        sable_macros::inc!(counter, crate::Metrics::VALIDATION_FAILURE, "kind" => err.kind());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsensusError, test_utils::MemoryChain};
    use alloy_primitives::{Bloom, U256};
    use mockall::mock;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    /// An engine returning a fixed verdict and counting calls.
    #[derive(Debug, Default)]
    struct FixedEngine {
        verdict: Option<ConsensusError>,
        calls: AtomicUsize,
    }

    impl ConsensusEngine for FixedEngine {
        fn verify_uncles(
            &self,
            _chain: &dyn ChainReader,
            _block: &Block,
        ) -> Result<(), ConsensusError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict.clone().map_or(Ok(()), Err)
        }
    }

    mock! {
        #[derive(Debug)]
        pub Chain {}

        impl ChainReader for Chain {
            fn has_block_with_state(&self, hash: B256, number: u64) -> bool;
            fn has_block(&self, hash: B256, number: u64) -> bool;
            fn block_by_hash(&self, hash: B256) -> Option<Block>;
            fn block_by_number(&self, number: u64) -> Option<Block>;
            fn canonical_hash(&self, number: u64) -> Option<B256>;
            fn current_header(&self) -> Header;
            fn receipts_by_hash(&self, hash: B256) -> Vec<Receipt>;
        }
    }

    fn next_block(chain: &MemoryChain) -> (Block, Vec<Receipt>) {
        MemoryChain::child(&chain.current_header(), 1)
    }

    fn validator(chain: &MemoryChain) -> BlockValidator<&MemoryChain, FixedEngine> {
        BlockValidator::new(chain, FixedEngine::default())
    }

    #[test]
    fn test_validate_body_ok() {
        let chain = MemoryChain::new(8);
        let (block, _) = next_block(&chain);
        let validator = validator(&chain);
        assert_eq!(validator.validate_body(&block), Ok(()));
        assert_eq!(validator.engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validate_body_with_uncles() {
        let mut chain = MemoryChain::new(8);
        let uncle = chain.fork(6, 1, 9)[0];
        let uncle = chain.header_by_hash(uncle).unwrap();
        let (block, _) =
            MemoryChain::child_with_uncles(&chain.current_header(), 1, vec![uncle]);
        assert_eq!(validator(&chain).validate_body(&block), Ok(()));
    }

    #[test]
    fn test_known_block() {
        let chain = MemoryChain::new(8);
        let block = chain.block(5).unwrap().clone();
        let validator = validator(&chain);
        let err = validator.validate_body(&block).unwrap_err();
        assert_eq!(err, ValidationError::KnownBlock { hash: chain.hash(5).unwrap(), number: 5 });
        assert!(err.is_benign());
        // Known blocks never reach the engine.
        assert_eq!(validator.engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_engine_error_propagates_before_root_checks() {
        let chain = MemoryChain::new(4);
        let (mut block, _) = next_block(&chain);
        block.header.transactions_root = B256::ZERO;
        let engine = FixedEngine {
            verdict: Some(ConsensusError::TooManyUncles { count: 3, max: 2 }),
            ..Default::default()
        };
        let validator = BlockValidator::new(&chain, engine);
        assert_eq!(
            validator.validate_body(&block),
            Err(ValidationError::Consensus(ConsensusError::TooManyUncles { count: 3, max: 2 }))
        );
    }

    #[test]
    fn test_uncle_root_mismatch() {
        let chain = MemoryChain::new(4);
        let (mut block, _) = next_block(&chain);
        let computed = block.header.ommers_hash;
        block.header.ommers_hash = B256::with_last_byte(1);
        // Checked before the transaction root.
        block.header.transactions_root = B256::ZERO;
        assert_eq!(
            validator(&chain).validate_body(&block),
            Err(ValidationError::UncleRootMismatch { expected: B256::with_last_byte(1), computed })
        );
    }

    #[test]
    fn test_tx_root_mismatch() {
        let chain = MemoryChain::new(4);
        let (mut block, _) = next_block(&chain);
        block.body.transactions.pop();
        let err = validator(&chain).validate_body(&block).unwrap_err();
        assert!(matches!(err, ValidationError::TxRootMismatch { .. }));
        assert!(err.should_penalize_peer());
    }

    #[test]
    fn test_unknown_ancestor() {
        let chain = MemoryChain::new(4);
        let orphan_parent = MemoryChain::child(&chain.current_header(), 5).0.header;
        let (block, _) = MemoryChain::child(&orphan_parent, 5);
        assert_eq!(
            validator(&chain).validate_body(&block),
            Err(ValidationError::UnknownAncestor { parent: orphan_parent.hash_slow(), block: 6 })
        );
    }

    #[test]
    fn test_pruned_ancestor() {
        let mut chain = MemoryChain::new(4);
        let head = chain.hash(4).unwrap();
        chain.prune_state(head);
        let (block, _) = next_block(&chain);
        let err = validator(&chain).validate_body(&block).unwrap_err();
        assert_eq!(err, ValidationError::PrunedAncestor { parent: head, block: 5 });
        assert!(err.is_retryable());
    }

    #[test]
    fn test_ancestor_lookups_through_mock_chain() {
        let chain = MemoryChain::new(2);
        let (block, _) = next_block(&chain);
        let parent = block.header.parent_hash;

        let mut mock = MockChain::new();
        mock.expect_has_block_with_state().returning(|_, _| false);
        mock.expect_has_block()
            .withf(move |hash, number| *hash == parent && *number == 2)
            .returning(|_, _| true);

        let validator = BlockValidator::new(Arc::new(mock), FixedEngine::default());
        assert_eq!(
            validator.validate_body(&block),
            Err(ValidationError::PrunedAncestor { parent, block: 3 })
        );
    }

    #[test]
    fn test_genesis_without_state_has_unknown_ancestor() {
        let mut mock = MockChain::new();
        mock.expect_has_block_with_state().returning(|_, _| false);
        let genesis = MemoryChain::genesis();
        let validator = BlockValidator::new(mock, FixedEngine::default());
        assert_eq!(
            validator.validate_body(&genesis),
            Err(ValidationError::UnknownAncestor { parent: B256::ZERO, block: 0 })
        );
    }

    #[test]
    fn test_validate_state_ok() {
        let chain = MemoryChain::new(3);
        let (block, receipts) = next_block(&chain);
        let header = &block.header;
        assert_eq!(
            validator(&chain).validate_state(&block, header.state_root, &receipts, header.gas_used),
            Ok(())
        );
    }

    #[test]
    fn test_gas_used_mismatch() {
        let chain = MemoryChain::new(3);
        let (block, receipts) = next_block(&chain);
        let header = &block.header;
        assert_eq!(
            validator(&chain).validate_state(&block, header.state_root, &receipts, 1),
            Err(ValidationError::GasUsedMismatch { expected: header.gas_used, used: 1 })
        );
    }

    #[test]
    fn test_receipt_root_mismatch() {
        let chain = MemoryChain::new(3);
        let (block, mut receipts) = next_block(&chain);
        let header = &block.header;
        if let Receipt::Legacy(receipt) = &mut receipts[0] {
            receipt.receipt.cumulative_gas_used += 1;
        }
        let err = validator(&chain)
            .validate_state(&block, header.state_root, &receipts, header.gas_used)
            .unwrap_err();
        assert!(matches!(err, ValidationError::ReceiptRootMismatch { .. }));
    }

    #[test]
    fn test_state_root_mismatch() {
        let chain = MemoryChain::new(3);
        let (block, receipts) = next_block(&chain);
        let header = &block.header;
        assert_eq!(
            validator(&chain).validate_state(&block, B256::ZERO, &receipts, header.gas_used),
            Err(ValidationError::StateRootMismatch {
                expected: header.state_root,
                computed: B256::ZERO
            })
        );
    }

    #[test]
    fn test_bloom_mismatch_takes_precedence() {
        let chain = MemoryChain::new(3);
        let (mut block, receipts) = next_block(&chain);
        let computed = block.header.logs_bloom;
        block.header.logs_bloom = Bloom::ZERO;
        let gas_used = block.header.gas_used;
        let expected = ValidationError::BloomMismatch {
            expected: Box::new(Bloom::ZERO),
            computed: Box::new(computed),
        };

        let validator = validator(&chain);
        assert_eq!(
            validator.validate_state(&block, block.header.state_root, &receipts, gas_used),
            Err(expected.clone())
        );
        // Also reported when the state root is wrong.
        assert_eq!(validator.validate_state(&block, B256::ZERO, &receipts, gas_used), Err(expected));
    }

    #[test]
    fn test_gas_used_checked_before_bloom() {
        let chain = MemoryChain::new(3);
        let (mut block, receipts) = next_block(&chain);
        block.header.logs_bloom = Bloom::ZERO;
        let err = validator(&chain)
            .validate_state(&block, B256::ZERO, &receipts, block.header.gas_used + 1)
            .unwrap_err();
        assert!(matches!(err, ValidationError::GasUsedMismatch { .. }));
        assert_eq!(err.kind(), "gas_used");
    }

    #[test]
    fn test_validate_state_is_idempotent() {
        let chain = MemoryChain::new(3);
        let (block, mut receipts) = next_block(&chain);
        receipts.pop();
        let validator = validator(&chain);
        let first = validator.validate_state(&block, B256::ZERO, &receipts, block.header.gas_used);
        let second = validator.validate_state(&block, B256::ZERO, &receipts, block.header.gas_used);
        assert!(first.is_err());
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_state_empty_block() {
        let chain = MemoryChain::new(0);
        let genesis = chain.block(0).unwrap().clone();
        assert_eq!(
            validator(&chain).validate_state(&genesis, genesis.header.state_root, &[], 0),
            Ok(())
        );
        assert_eq!(U256::from(1), genesis.header.difficulty);
    }
}
