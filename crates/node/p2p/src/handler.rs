//! Serves retrieval requests from the local chain.

use crate::{
    BlockBodies, BlockBody, BlockHeaders, EthMessage, GetBlockHeaders, HashOrNumber, NodeData,
    Receipts, ServeLimits,
};
use alloy_consensus::{Header, constants::EMPTY_ROOT_HASH};
use alloy_primitives::{B256, Bytes};
use alloy_rlp::Encodable;
use sable_protocol::{ChainReader, Receipt, StateReader};

/// Answers header, body, receipt and node data requests.
///
/// Every answer is computed against the view handed back by the chain reader and is capped
/// by the configured [`ServeLimits`]. Unknown items are skipped, never padded.
#[derive(Debug, Clone)]
pub struct RetrievalHandler<C> {
    chain: C,
    limits: ServeLimits,
}

impl<C> RetrievalHandler<C>
where
    C: ChainReader + StateReader,
{
    /// Creates a handler serving from `chain`.
    pub const fn new(chain: C, limits: ServeLimits) -> Self {
        Self { chain, limits }
    }

    /// Returns the chain reader.
    pub const fn chain(&self) -> &C {
        &self.chain
    }

    /// Returns the serving ceilings.
    pub const fn limits(&self) -> &ServeLimits {
        &self.limits
    }

    /// Answers a request message, returning `None` for messages that are not requests.
    pub fn respond(&self, request: &EthMessage) -> Option<EthMessage> {
        let response = match request {
            EthMessage::GetBlockHeaders(pair) => EthMessage::BlockHeaders(
                pair.map(|query| BlockHeaders(self.answer_headers(&query))),
            ),
            EthMessage::GetBlockBodies(pair) => EthMessage::BlockBodies(
                pair.clone().map(|hashes| BlockBodies(self.answer_bodies(&hashes.0))),
            ),
            EthMessage::GetReceipts(pair) => EthMessage::Receipts(
                pair.clone().map(|hashes| Receipts(self.answer_receipts(&hashes.0))),
            ),
            EthMessage::GetNodeData(pair) => EthMessage::NodeData(
                pair.clone().map(|hashes| NodeData(self.answer_node_data(&hashes.0))),
            ),
            _ => return None,
        };
        Some(response)
    }

    /// Walks the chain from the query origin, collecting headers.
    ///
    /// The walk stops early, keeping what it collected, when it runs off either end of the
    /// chain, when the cursor arithmetic would overflow, or when a ceiling is reached.
    pub fn answer_headers(&self, query: &GetBlockHeaders) -> Vec<Header> {
        let max_headers = self.limits.max_headers;
        let max_lookups = max_headers.saturating_mul(2);
        let mut max_non_canonical = self.limits.max_non_canonical;

        let mut headers: Vec<Header> = Vec::new();
        let mut bytes = 0;
        let mut lookups = 0;
        let mut cursor = query.origin;
        let mut number = None;

        while (headers.len() as u64) < query.amount
            && headers.len() < max_headers
            && bytes < self.limits.soft_response_limit
            && lookups < max_lookups
        {
            lookups += 1;
            let header = match (cursor, number) {
                (HashOrNumber::Hash(hash), None) => self.chain.header_by_hash(hash),
                (HashOrNumber::Hash(hash), Some(number)) => self.chain.header(hash, number),
                (HashOrNumber::Number(number), _) => self.chain.header_by_number(number),
            };
            let Some(header) = header else { break };

            let next = self.advance(query, cursor, header.number, &mut max_non_canonical);
            bytes += header.length();
            headers.push(header);
            match next {
                Some((next, next_number)) => {
                    cursor = next;
                    number = Some(next_number);
                }
                None => break,
            }
        }

        sable_macros::add!(
            counter,
            crate::Metrics::SERVED_ITEMS,
            headers.len() as u64,
            "kind" => "headers"
        );
        headers
    }

    /// Moves the cursor past the header at `current`, returning the next cursor and its
    /// expected number, or `None` when the walk is over.
    fn advance(
        &self,
        query: &GetBlockHeaders,
        cursor: HashOrNumber,
        current: u64,
        max_non_canonical: &mut u64,
    ) -> Option<(HashOrNumber, u64)> {
        let Some(step) = query.skip.checked_add(1) else {
            Self::skip_overflow(query, current);
            return None;
        };
        match (cursor, query.reverse) {
            (HashOrNumber::Hash(hash), true) => self
                .chain
                .ancestor(hash, current, step, max_non_canonical)
                .map(|(hash, number)| (HashOrNumber::Hash(hash), number)),
            (HashOrNumber::Hash(hash), false) => {
                let Some(next) = current.checked_add(step) else {
                    Self::skip_overflow(query, current);
                    return None;
                };
                let next_hash = self.chain.canonical_hash(next)?;
                let (ancestor, _) =
                    self.chain.ancestor(next_hash, next, step, max_non_canonical)?;
                (ancestor == hash).then_some((HashOrNumber::Hash(next_hash), next))
            }
            (HashOrNumber::Number(_), true) => {
                current.checked_sub(step).map(|next| (HashOrNumber::Number(next), next))
            }
            (HashOrNumber::Number(_), false) => match current.checked_add(step) {
                Some(next) => Some((HashOrNumber::Number(next), next)),
                None => {
                    Self::skip_overflow(query, current);
                    None
                }
            },
        }
    }

    fn skip_overflow(query: &GetBlockHeaders, current: u64) {
        warn!(
            target: "p2p",
            current,
            skip = query.skip,
            reverse = query.reverse,
            "GetBlockHeaders skip overflow attack"
        );
    }

    /// Returns the bodies of the blocks with the given hashes, in request order.
    pub fn answer_bodies(&self, hashes: &[B256]) -> Vec<BlockBody> {
        let bodies = self.collect(hashes, self.limits.max_bodies, |hash| {
            self.chain.block_by_hash(hash).map(BlockBody::from)
        });
        sable_macros::add!(
            counter,
            crate::Metrics::SERVED_ITEMS,
            bodies.len() as u64,
            "kind" => "bodies"
        );
        bodies
    }

    /// Returns the receipts of the blocks with the given hashes, in request order.
    ///
    /// A block without receipts is only answered when its header commits to an empty
    /// receipt list.
    pub fn answer_receipts(&self, hashes: &[B256]) -> Vec<Vec<Receipt>> {
        let receipts = self.collect(hashes, self.limits.max_receipts, |hash| {
            let receipts = self.chain.receipts_by_hash(hash);
            if receipts.is_empty() {
                let header = self.chain.header_by_hash(hash)?;
                return (header.receipts_root == EMPTY_ROOT_HASH).then_some(receipts);
            }
            Some(receipts)
        });
        sable_macros::add!(
            counter,
            crate::Metrics::SERVED_ITEMS,
            receipts.len() as u64,
            "kind" => "receipts"
        );
        receipts
    }

    /// Returns the trie nodes and code blobs with the given hashes, in request order.
    pub fn answer_node_data(&self, hashes: &[B256]) -> Vec<Bytes> {
        let nodes = self.collect(hashes, self.limits.max_node_data, |hash| {
            self.chain.node_data(hash).filter(|data| !data.is_empty())
        });
        sable_macros::add!(
            counter,
            crate::Metrics::SERVED_ITEMS,
            nodes.len() as u64,
            "kind" => "node_data"
        );
        nodes
    }

    /// Looks up hashes in order until a ceiling is hit. Lookups are capped at twice the
    /// item ceiling.
    fn collect<T: Encodable>(
        &self,
        hashes: &[B256],
        max_items: usize,
        lookup: impl Fn(B256) -> Option<T>,
    ) -> Vec<T> {
        let max_lookups = max_items.saturating_mul(2);
        let mut items = Vec::new();
        let mut bytes = 0;
        for (lookups, hash) in hashes.iter().enumerate() {
            if bytes >= self.limits.soft_response_limit
                || items.len() >= max_items
                || lookups >= max_lookups
            {
                break;
            }
            if let Some(item) = lookup(*hash) {
                bytes += item.length();
                items.push(item);
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GetBlockBodies, GetReceipts, RequestPair};
    use rstest::rstest;
    use sable_protocol::test_utils::MemoryChain;

    const LIMIT: u64 = 32;

    fn handler() -> RetrievalHandler<MemoryChain> {
        let limits = ServeLimits { max_headers: LIMIT as usize, ..Default::default() };
        RetrievalHandler::new(MemoryChain::new(LIMIT + 15), limits)
    }

    fn numbers(headers: &[Header]) -> Vec<u64> {
        headers.iter().map(|header| header.number).collect()
    }

    fn query(origin: u64, amount: u64, skip: u64, reverse: bool) -> GetBlockHeaders {
        GetBlockHeaders { origin: HashOrNumber::Number(origin), amount, skip, reverse }
    }

    const HEAD: u64 = LIMIT + 15;
    const MID: u64 = LIMIT / 2;

    #[rstest]
    #[case::single(query(MID, 1, 0, false), vec![MID])]
    #[case::forward(query(MID, 3, 0, false), vec![MID, MID + 1, MID + 2])]
    #[case::reverse(query(MID, 3, 0, true), vec![MID, MID - 1, MID - 2])]
    #[case::forward_skip(query(MID, 3, 3, false), vec![MID, MID + 4, MID + 8])]
    #[case::reverse_skip(query(MID, 3, 3, true), vec![MID, MID - 4, MID - 8])]
    #[case::genesis(query(0, 1, 0, false), vec![0])]
    #[case::head(query(HEAD, 1, 0, false), vec![HEAD])]
    #[case::item_ceiling(query(HEAD - 1, LIMIT + 10, 0, true), (HEAD - LIMIT..HEAD).rev().collect())]
    #[case::past_head(query(HEAD - 4, 3, 3, false), vec![HEAD - 4, HEAD])]
    #[case::past_genesis(query(4, 3, 3, true), vec![4, 0])]
    #[case::past_head_mid_skip(query(HEAD - 4, 3, 2, false), vec![HEAD - 4, HEAD - 1])]
    #[case::past_genesis_mid_skip(query(4, 3, 2, true), vec![4, 1])]
    #[case::short_chain_start(query(2, 5, 0, true), vec![2, 1, 0])]
    #[case::unknown_number(query(HEAD + 1, 1, 0, false), vec![])]
    fn test_header_walks(#[case] query: GetBlockHeaders, #[case] expected: Vec<u64>) {
        let handler = handler();
        assert_eq!(numbers(&handler.answer_headers(&query)), expected);

        // The same walk anchored by hash gives the same answer.
        let HashOrNumber::Number(origin) = query.origin else { unreachable!() };
        if let Some(hash) = handler.chain().hash(origin) {
            let query = GetBlockHeaders { origin: HashOrNumber::Hash(hash), ..query };
            assert_eq!(numbers(&handler.answer_headers(&query)), expected);
        }
    }

    #[rstest]
    #[case::wraps_to_chain_start(3, u64::MAX - 1)]
    #[case::wraps_to_origin(1, u64::MAX)]
    fn test_skip_overflow(#[case] origin: u64, #[case] skip: u64) {
        let handler = handler();
        let hash = handler.chain().hash(origin).unwrap();
        for reverse in [false, true] {
            let query = GetBlockHeaders { origin: HashOrNumber::Hash(hash), amount: 2, skip, reverse };
            assert_eq!(numbers(&handler.answer_headers(&query)), vec![origin]);

            let query = GetBlockHeaders { origin: HashOrNumber::Number(origin), ..query };
            assert_eq!(numbers(&handler.answer_headers(&query)), vec![origin]);
        }
    }

    #[test]
    fn test_unknown_origin_hash() {
        let query = GetBlockHeaders {
            origin: HashOrNumber::Hash(B256::with_last_byte(0x1f)),
            amount: 1,
            ..Default::default()
        };
        assert!(handler().answer_headers(&query).is_empty());
    }

    #[test]
    fn test_hash_walk_stops_at_side_chain() {
        let mut chain = MemoryChain::new(20);
        let branch = chain.fork(5, 5, 9);
        let handler = RetrievalHandler::new(chain, ServeLimits::default());

        // Walking forward from a side chain block cannot reach the canonical chain.
        let query = GetBlockHeaders { origin: HashOrNumber::Hash(branch[0]), amount: 3, ..Default::default() };
        assert_eq!(numbers(&handler.answer_headers(&query)), vec![6]);

        // Walking backward follows the side chain down to the canonical one.
        let query = GetBlockHeaders { reverse: true, ..query };
        let headers = handler.answer_headers(&query);
        assert_eq!(numbers(&headers), vec![6, 5, 4]);
        assert_eq!(headers[0].hash_slow(), branch[0]);
        assert_eq!(Some(headers[1].hash_slow()), handler.chain().hash(5));
    }

    #[test]
    fn test_header_soft_limit() {
        let limits = ServeLimits { soft_response_limit: 1, ..Default::default() };
        let handler = RetrievalHandler::new(MemoryChain::new(10), limits);
        assert_eq!(numbers(&handler.answer_headers(&query(0, 5, 0, false))), vec![0]);
    }

    #[test]
    fn test_bodies_skip_unknown_hashes() {
        let handler = handler();
        let chain = handler.chain();
        let hashes = vec![
            chain.hash(3).unwrap(),
            B256::repeat_byte(0xaa),
            chain.hash(1).unwrap(),
            B256::repeat_byte(0xbb),
            chain.hash(7).unwrap(),
        ];
        let bodies = handler.answer_bodies(&hashes);
        let expected: Vec<BlockBody> =
            [3, 1, 7].into_iter().map(|n| BlockBody::from(chain.block(n).unwrap().clone())).collect();
        assert_eq!(bodies, expected);
    }

    /// The hash list answers, which share the same ceilings.
    #[derive(Debug, Clone, Copy)]
    enum HashAnswer {
        Bodies,
        Receipts,
        NodeData,
    }

    impl HashAnswer {
        fn limits(self, max_items: usize) -> ServeLimits {
            let limits = ServeLimits::default();
            match self {
                Self::Bodies => ServeLimits { max_bodies: max_items, ..limits },
                Self::Receipts => ServeLimits { max_receipts: max_items, ..limits },
                Self::NodeData => ServeLimits { max_node_data: max_items, ..limits },
            }
        }

        /// Builds a handler with five servable hashes of this kind.
        fn handler(self, limits: ServeLimits) -> (RetrievalHandler<MemoryChain>, Vec<B256>) {
            let mut chain = MemoryChain::new(10);
            let known = match self {
                Self::Bodies | Self::Receipts => {
                    (1..=5).map(|n| chain.hash(n).unwrap()).collect()
                }
                Self::NodeData => (1..=5u8)
                    .map(|n| chain.insert_node(Bytes::from(vec![n; 16])))
                    .collect(),
            };
            (RetrievalHandler::new(chain, limits), known)
        }

        fn answer(self, handler: &RetrievalHandler<MemoryChain>, hashes: &[B256]) -> usize {
            match self {
                Self::Bodies => handler.answer_bodies(hashes).len(),
                Self::Receipts => handler.answer_receipts(hashes).len(),
                Self::NodeData => handler.answer_node_data(hashes).len(),
            }
        }
    }

    #[rstest]
    fn test_hash_answer_soft_limit(
        #[values(HashAnswer::Bodies, HashAnswer::Receipts, HashAnswer::NodeData)] kind: HashAnswer,
    ) {
        let limits = ServeLimits { soft_response_limit: 1, ..Default::default() };
        let (handler, known) = kind.handler(limits);
        assert_eq!(kind.answer(&handler, &known), 1);
    }

    #[rstest]
    fn test_hash_answer_item_ceiling(
        #[values(HashAnswer::Bodies, HashAnswer::Receipts, HashAnswer::NodeData)] kind: HashAnswer,
    ) {
        let (handler, known) = kind.handler(kind.limits(2));
        assert_eq!(kind.answer(&handler, &known), 2);

        let (handler, known) = kind.handler(ServeLimits::default());
        assert_eq!(kind.answer(&handler, &known), 5);
    }

    #[rstest]
    fn test_hash_answer_lookup_ceiling(
        #[values(HashAnswer::Bodies, HashAnswer::Receipts, HashAnswer::NodeData)] kind: HashAnswer,
    ) {
        let (handler, known) = kind.handler(kind.limits(2));

        // Four lookups are allowed, so a known hash in fifth place is never reached.
        let mut hashes: Vec<_> = (0..4).map(|n| B256::with_last_byte(0xf0 + n)).collect();
        hashes.push(known[0]);
        assert_eq!(kind.answer(&handler, &hashes), 0);

        hashes.remove(0);
        assert_eq!(kind.answer(&handler, &hashes), 1);
    }

    #[test]
    fn test_receipts() {
        let handler = handler();
        let chain = handler.chain();
        let genesis = chain.hash(0).unwrap();
        let hashes = vec![genesis, B256::repeat_byte(0xaa), chain.hash(1).unwrap(), chain.hash(2).unwrap()];
        let receipts = handler.answer_receipts(&hashes);
        assert_eq!(receipts.len(), 3);
        assert!(receipts[0].is_empty());
        assert_eq!(receipts[1], chain.receipts(hashes[2]));
        assert_eq!(receipts[2], chain.receipts(hashes[3]));
    }

    #[test]
    fn test_node_data_skips_unknown() {
        let mut chain = MemoryChain::new(1);
        let first = chain.insert_node(Bytes::from_static(b"first"));
        let second = chain.insert_node(Bytes::from_static(b"second"));
        let handler = RetrievalHandler::new(chain, ServeLimits::default());

        let nodes = handler.answer_node_data(&[second, B256::ZERO, first, B256::repeat_byte(1)]);
        assert_eq!(nodes, vec![Bytes::from_static(b"second"), Bytes::from_static(b"first")]);
    }

    #[test]
    fn test_respond_echoes_request_id() {
        let handler = handler();
        let hash = handler.chain().hash(2).unwrap();

        let request = EthMessage::GetBlockHeaders(RequestPair::new(123, query(2, 1, 0, false)));
        let Some(EthMessage::BlockHeaders(response)) = handler.respond(&request) else {
            panic!("expected headers");
        };
        assert_eq!(response.request_id, 123);
        assert_eq!(response.message.0[0].hash_slow(), hash);

        let request = EthMessage::GetBlockBodies(RequestPair::new(7, GetBlockBodies(vec![hash])));
        assert_eq!(handler.respond(&request).and_then(|m| m.request_id()), Some(7));

        let request = EthMessage::GetReceipts(RequestPair::new(8, GetReceipts(vec![hash])));
        assert!(matches!(handler.respond(&request), Some(EthMessage::Receipts(pair)) if pair.message.0.len() == 1));

        let response = EthMessage::BlockHeaders(RequestPair::new(9, BlockHeaders::default()));
        assert_eq!(handler.respond(&response), None);
    }
}
