//! Message framing.

use super::{
    BlockBodies, BlockHeaders, EthMessageId, GetBlockBodies, GetBlockHeaders, GetNodeData,
    GetReceipts, NodeData, Receipts, RequestPair, Status,
};
use crate::{MAX_MESSAGE_SIZE, ProtocolError};
use alloy_primitives::Bytes;
use alloy_rlp::Decodable;

/// A message as framed by the transport: its code and RLP payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// The message code.
    pub id: u8,
    /// The RLP encoded payload.
    pub payload: Bytes,
}

/// A decoded protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EthMessage {
    /// Handshake status.
    Status(Status),
    /// Header request.
    GetBlockHeaders(RequestPair<GetBlockHeaders>),
    /// Header response.
    BlockHeaders(RequestPair<BlockHeaders>),
    /// Body request.
    GetBlockBodies(RequestPair<GetBlockBodies>),
    /// Body response.
    BlockBodies(RequestPair<BlockBodies>),
    /// Node data request.
    GetNodeData(RequestPair<GetNodeData>),
    /// Node data response.
    NodeData(RequestPair<NodeData>),
    /// Receipt request.
    GetReceipts(RequestPair<GetReceipts>),
    /// Receipt response.
    Receipts(RequestPair<Receipts>),
}

impl EthMessage {
    /// Returns the code of this message.
    pub const fn message_id(&self) -> EthMessageId {
        match self {
            Self::Status(_) => EthMessageId::Status,
            Self::GetBlockHeaders(_) => EthMessageId::GetBlockHeaders,
            Self::BlockHeaders(_) => EthMessageId::BlockHeaders,
            Self::GetBlockBodies(_) => EthMessageId::GetBlockBodies,
            Self::BlockBodies(_) => EthMessageId::BlockBodies,
            Self::GetNodeData(_) => EthMessageId::GetNodeData,
            Self::NodeData(_) => EthMessageId::NodeData,
            Self::GetReceipts(_) => EthMessageId::GetReceipts,
            Self::Receipts(_) => EthMessageId::Receipts,
        }
    }

    /// Returns the request id carried by this message, if any.
    pub const fn request_id(&self) -> Option<u64> {
        Some(match self {
            Self::Status(_) => return None,
            Self::GetBlockHeaders(pair) => pair.request_id,
            Self::BlockHeaders(pair) => pair.request_id,
            Self::GetBlockBodies(pair) => pair.request_id,
            Self::BlockBodies(pair) => pair.request_id,
            Self::GetNodeData(pair) => pair.request_id,
            Self::NodeData(pair) => pair.request_id,
            Self::GetReceipts(pair) => pair.request_id,
            Self::Receipts(pair) => pair.request_id,
        })
    }

    /// Decodes a framed message.
    ///
    /// The whole payload must be consumed; oversized payloads are rejected before decoding.
    pub fn decode(raw: &RawMessage) -> Result<Self, ProtocolError> {
        if raw.payload.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: raw.payload.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        let id = EthMessageId::try_from(raw.id)?;
        let buf = &mut raw.payload.as_ref();
        Ok(match id {
            EthMessageId::Status => Self::Status(decode_exact(id, buf)?),
            EthMessageId::GetBlockHeaders => Self::GetBlockHeaders(decode_exact(id, buf)?),
            EthMessageId::BlockHeaders => Self::BlockHeaders(decode_exact(id, buf)?),
            EthMessageId::GetBlockBodies => Self::GetBlockBodies(decode_exact(id, buf)?),
            EthMessageId::BlockBodies => Self::BlockBodies(decode_exact(id, buf)?),
            EthMessageId::GetNodeData => Self::GetNodeData(decode_exact(id, buf)?),
            EthMessageId::NodeData => Self::NodeData(decode_exact(id, buf)?),
            EthMessageId::GetReceipts => Self::GetReceipts(decode_exact(id, buf)?),
            EthMessageId::Receipts => Self::Receipts(decode_exact(id, buf)?),
        })
    }

    /// Encodes the message into a frame.
    pub fn encode(&self) -> RawMessage {
        let payload = match self {
            Self::Status(status) => alloy_rlp::encode(status),
            Self::GetBlockHeaders(pair) => alloy_rlp::encode(pair),
            Self::BlockHeaders(pair) => alloy_rlp::encode(pair),
            Self::GetBlockBodies(pair) => alloy_rlp::encode(pair),
            Self::BlockBodies(pair) => alloy_rlp::encode(pair),
            Self::GetNodeData(pair) => alloy_rlp::encode(pair),
            Self::NodeData(pair) => alloy_rlp::encode(pair),
            Self::GetReceipts(pair) => alloy_rlp::encode(pair),
            Self::Receipts(pair) => alloy_rlp::encode(pair),
        };
        RawMessage { id: self.message_id().into(), payload: payload.into() }
    }
}

fn decode_exact<T: Decodable>(id: EthMessageId, buf: &mut &[u8]) -> Result<T, ProtocolError> {
    let value = T::decode(buf).map_err(|source| ProtocolError::Decode { id, source })?;
    if !buf.is_empty() {
        return Err(ProtocolError::TrailingBytes { id, remaining: buf.len() });
    }
    Ok(value)
}
