//! Block and receipt types.

use alloy_consensus::{ReceiptEnvelope, TxEnvelope};
use alloy_primitives::Bloom;

/// A block: header, ordered transactions and ordered uncle headers.
pub type Block = alloy_consensus::Block<TxEnvelope>;

/// A transaction receipt.
pub type Receipt = ReceiptEnvelope;

/// Derives the logs bloom of a block from its receipts.
pub fn create_bloom(receipts: &[Receipt]) -> Bloom {
    let mut bloom = Bloom::ZERO;
    for log in receipts.iter().flat_map(|receipt| receipt.logs()) {
        bloom.accrue_log(log);
    }
    bloom
}
