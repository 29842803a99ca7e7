//! Body retrieval messages.

use alloy_consensus::{Header, TxEnvelope};
use alloy_primitives::B256;
use alloy_rlp::{RlpDecodable, RlpDecodableWrapper, RlpEncodable, RlpEncodableWrapper};
use sable_protocol::Block;

/// The body of a block as sent on the wire: its transactions and uncles.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct BlockBody {
    /// Transactions in block order.
    pub transactions: Vec<TxEnvelope>,
    /// Uncle headers in block order.
    pub uncles: Vec<Header>,
}

impl From<Block> for BlockBody {
    fn from(block: Block) -> Self {
        Self { transactions: block.body.transactions, uncles: block.body.ommers }
    }
}

/// A request for the bodies of the blocks with the given hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct GetBlockBodies(pub Vec<B256>);

/// Bodies answering a [`GetBlockBodies`] request, in request order, unknown blocks omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct BlockBodies(pub Vec<BlockBody>);
