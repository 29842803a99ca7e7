//! Deterministic in-memory chain for tests.

use crate::{Block, ChainReader, Receipt, StateReader, create_bloom};
use alloy_consensus::{
    BlockBody, Eip658Value, Header, Receipt as ExecutionReceipt, ReceiptEnvelope, ReceiptWithBloom,
    SignableTransaction, TxEnvelope, TxLegacy,
    proofs::{calculate_ommers_root, calculate_receipt_root, calculate_transaction_root},
};
use alloy_primitives::{Address, B256, Bytes, Log, Signature, TxKind, U256, keccak256, logs_bloom};
use std::collections::{HashMap, HashSet};

/// Gas used by every generated transaction.
pub const TX_GAS: u64 = 21_000;

/// An in-memory chain implementing [`ChainReader`] and [`StateReader`].
///
/// Generated blocks carry one to three transactions, each emitting one log, with
/// consistent roots, bloom and gas used.
#[derive(Debug, Clone, Default)]
pub struct MemoryChain {
    blocks: HashMap<B256, Block>,
    receipts: HashMap<B256, Vec<Receipt>>,
    canonical: Vec<B256>,
    with_state: HashSet<B256>,
    difficulty: HashMap<B256, U256>,
    nodes: HashMap<B256, Bytes>,
}

impl MemoryChain {
    /// Creates a chain made of the genesis block and `len` canonical blocks on top.
    pub fn new(len: u64) -> Self {
        let mut chain = Self::default();
        chain.push_canonical(Self::genesis(), Vec::new());
        for _ in 0..len {
            let (block, receipts) = Self::child(&chain.current_header(), 0);
            chain.push_canonical(block, receipts);
        }
        chain
    }

    /// The genesis block shared by every generated chain.
    pub fn genesis() -> Block {
        let header = Header {
            gas_limit: 5_000_000,
            difficulty: U256::from(1),
            extra_data: Bytes::from_static(b"sable"),
            state_root: keccak256(b"genesis"),
            ommers_hash: calculate_ommers_root::<Header>(&[]),
            transactions_root: calculate_transaction_root::<TxEnvelope>(&[]),
            receipts_root: calculate_receipt_root::<Receipt>(&[]),
            ..Default::default()
        };
        let body = BlockBody { transactions: Vec::new(), ommers: Vec::new(), withdrawals: None };
        Block { header, body }
    }

    /// Builds a valid child of `parent`. Children of the same parent differ by `seed`.
    pub fn child(parent: &Header, seed: u64) -> (Block, Vec<Receipt>) {
        Self::child_with_uncles(parent, seed, Vec::new())
    }

    /// Builds a valid child of `parent` that includes the given uncles.
    pub fn child_with_uncles(
        parent: &Header,
        seed: u64,
        uncles: Vec<Header>,
    ) -> (Block, Vec<Receipt>) {
        let number = parent.number + 1;
        let count = 1 + number % 3;

        let mut transactions = Vec::new();
        let mut receipts = Vec::new();
        for i in 0..count {
            let tx = TxLegacy {
                chain_id: Some(1),
                nonce: number * 3 + i,
                gas_price: 1,
                gas_limit: TX_GAS,
                to: TxKind::Call(Address::with_last_byte(i as u8)),
                value: U256::from(seed),
                input: Bytes::new(),
            };
            let signature = Signature::new(U256::from(1), U256::from(1), false);
            transactions.push(TxEnvelope::from(tx.into_signed(signature)));

            let log = Log::new_unchecked(
                Address::with_last_byte(number as u8),
                vec![keccak256(number.to_be_bytes()), keccak256(seed.to_be_bytes())],
                Bytes::from(i.to_be_bytes().to_vec()),
            );
            let receipt = ExecutionReceipt {
                status: Eip658Value::Eip658(true),
                cumulative_gas_used: TX_GAS * (i + 1),
                logs: vec![log],
            };
            let bloom = logs_bloom(receipt.logs.iter());
            receipts.push(ReceiptEnvelope::Legacy(ReceiptWithBloom::new(receipt, bloom)));
        }

        let header = Header {
            parent_hash: parent.hash_slow(),
            number,
            gas_limit: parent.gas_limit,
            gas_used: TX_GAS * count,
            timestamp: parent.timestamp + 12,
            difficulty: U256::from(1),
            extra_data: Bytes::from(seed.to_be_bytes().to_vec()),
            state_root: keccak256([number.to_be_bytes(), seed.to_be_bytes()].concat()),
            ommers_hash: calculate_ommers_root(&uncles),
            transactions_root: calculate_transaction_root(&transactions),
            receipts_root: calculate_receipt_root(&receipts),
            logs_bloom: create_bloom(&receipts),
            ..Default::default()
        };
        let body = BlockBody { transactions, ommers: uncles, withdrawals: None };
        (Block { header, body }, receipts)
    }

    /// Appends a block to the canonical chain, with state. Returns its hash.
    pub fn push_canonical(&mut self, block: Block, receipts: Vec<Receipt>) -> B256 {
        let hash = self.insert_side(block, receipts);
        self.canonical.push(hash);
        hash
    }

    /// Stores a block, with state, without making it canonical. Returns its hash.
    pub fn insert_side(&mut self, block: Block, receipts: Vec<Receipt>) -> B256 {
        let hash = block.header.hash_slow();
        let parent_td =
            self.difficulty.get(&block.header.parent_hash).copied().unwrap_or_default();
        self.difficulty.insert(hash, parent_td + block.header.difficulty);
        self.blocks.insert(hash, block);
        self.receipts.insert(hash, receipts);
        self.with_state.insert(hash);
        hash
    }

    /// Grows a non-canonical branch of `len` blocks on top of the canonical block at
    /// `number`. Returns the branch hashes, lowest first.
    pub fn fork(&mut self, number: u64, len: u64, seed: u64) -> Vec<B256> {
        let mut parent = self.header_by_number(number).unwrap_or_else(|| self.current_header());
        let mut hashes = Vec::new();
        for _ in 0..len {
            let (block, receipts) = Self::child(&parent, seed);
            parent = block.header.clone();
            hashes.push(self.insert_side(block, receipts));
        }
        hashes
    }

    /// Drops the state of a block, keeping the block itself.
    pub fn prune_state(&mut self, hash: B256) {
        self.with_state.remove(&hash);
    }

    /// Stores a trie node or code blob. Returns its hash.
    pub fn insert_node(&mut self, data: Bytes) -> B256 {
        let hash = keccak256(&data);
        self.nodes.insert(hash, data);
        hash
    }

    /// Hash of the canonical block at `number`.
    pub fn hash(&self, number: u64) -> Option<B256> {
        self.canonical.get(number as usize).copied()
    }

    /// The canonical block at `number`.
    pub fn block(&self, number: u64) -> Option<&Block> {
        self.hash(number).and_then(|hash| self.blocks.get(&hash))
    }

    /// Receipts of the block with `hash`.
    pub fn receipts(&self, hash: B256) -> Vec<Receipt> {
        self.receipts.get(&hash).cloned().unwrap_or_default()
    }

    /// Number of the canonical head.
    pub fn head_number(&self) -> u64 {
        self.canonical.len().saturating_sub(1) as u64
    }
}

impl ChainReader for MemoryChain {
    fn has_block_with_state(&self, hash: B256, number: u64) -> bool {
        self.has_block(hash, number) && self.with_state.contains(&hash)
    }

    fn has_block(&self, hash: B256, number: u64) -> bool {
        self.blocks.get(&hash).is_some_and(|block| block.header.number == number)
    }

    fn block_by_hash(&self, hash: B256) -> Option<Block> {
        self.blocks.get(&hash).cloned()
    }

    fn block_by_number(&self, number: u64) -> Option<Block> {
        self.block(number).cloned()
    }

    fn canonical_hash(&self, number: u64) -> Option<B256> {
        self.hash(number)
    }

    fn current_header(&self) -> Header {
        self.block(self.head_number()).map(|block| block.header.clone()).unwrap_or_default()
    }

    fn receipts_by_hash(&self, hash: B256) -> Vec<Receipt> {
        self.receipts(hash)
    }

    fn header_by_hash(&self, hash: B256) -> Option<Header> {
        self.blocks.get(&hash).map(|block| block.header.clone())
    }

    fn total_difficulty(&self, hash: B256) -> Option<U256> {
        self.difficulty.get(&hash).copied()
    }
}

impl StateReader for MemoryChain {
    fn node_data(&self, hash: B256) -> Option<Bytes> {
        self.nodes.get(&hash).cloned()
    }
}
