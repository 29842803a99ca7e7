//! Header retrieval messages.

use alloy_consensus::Header;
use alloy_primitives::B256;
use alloy_rlp::{
    BufMut, Decodable, EMPTY_STRING_CODE, Encodable, RlpDecodable, RlpDecodableWrapper,
    RlpEncodable, RlpEncodableWrapper,
};
use derive_more::{Display, From};

/// The origin of a header query: a block hash or a block number.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From)]
pub enum HashOrNumber {
    /// A block hash.
    #[display("{_0}")]
    Hash(B256),
    /// A block number.
    #[display("#{_0}")]
    Number(u64),
}

impl Default for HashOrNumber {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl Encodable for HashOrNumber {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Hash(hash) => hash.encode(out),
            Self::Number(number) => number.encode(out),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Hash(hash) => hash.length(),
            Self::Number(number) => number.length(),
        }
    }
}

impl Decodable for HashOrNumber {
    /// A 32 byte string is a hash, anything else must be an integer of at most 8 bytes.
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let first = *buf.first().ok_or(alloy_rlp::Error::InputTooShort)?;
        if first == EMPTY_STRING_CODE + 32 {
            return B256::decode(buf).map(Self::Hash);
        }
        u64::decode(buf).map(Self::Number)
    }
}

/// A request for a sequence of headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct GetBlockHeaders {
    /// The block to start from.
    pub origin: HashOrNumber,
    /// Maximum number of headers to return.
    pub amount: u64,
    /// Blocks to skip between consecutive headers.
    pub skip: u64,
    /// Walk towards genesis instead of towards the head.
    pub reverse: bool,
}

/// Headers answering a [`GetBlockHeaders`] request.
#[derive(Debug, Clone, Default, PartialEq, Eq, RlpEncodableWrapper, RlpDecodableWrapper)]
pub struct BlockHeaders(pub Vec<Header>);
