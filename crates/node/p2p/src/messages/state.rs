//! Receipt and node data retrieval messages.

use alloy_primitives::{B256, Bytes};
use alloy_rlp::{RlpDecodableWrapper, RlpEncodableWrapper};
use sable_protocol::Receipt;

/// A request for the receipts of the blocks with the given hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct GetReceipts(pub Vec<B256>);

/// Receipts answering a [`GetReceipts`] request, one list per known block.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct Receipts(pub Vec<Vec<Receipt>>);

/// A request for trie nodes or contract code by hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct GetNodeData(pub Vec<B256>);

/// Trie nodes and code answering a [`GetNodeData`] request, unknown entries omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct NodeData(pub Vec<Bytes>);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_rlp::Decodable;
    use sable_protocol::test_utils::MemoryChain;

    #[test]
    fn test_receipts_round_trip() {
        let chain = MemoryChain::new(4);
        let receipts = Receipts(
            (1..=4).map(|number| chain.receipts(chain.hash(number).unwrap())).collect(),
        );
        let encoded = alloy_rlp::encode(&receipts);
        assert_eq!(Receipts::decode(&mut encoded.as_slice()).unwrap(), receipts);
    }

    #[test]
    fn test_node_data_round_trip() {
        let data = NodeData(vec![Bytes::from_static(b"node"), Bytes::from_static(&[0xde, 0xad])]);
        let encoded = alloy_rlp::encode(&data);
        assert_eq!(NodeData::decode(&mut encoded.as_slice()).unwrap(), data);
    }
}
