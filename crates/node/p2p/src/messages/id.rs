//! Message codes.

use crate::ProtocolError;
use derive_more::Display;

/// The code identifying a message on the wire.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EthMessageId {
    /// Handshake status.
    Status = 0x00,
    /// Header request.
    GetBlockHeaders = 0x03,
    /// Header response.
    BlockHeaders = 0x04,
    /// Body request.
    GetBlockBodies = 0x05,
    /// Body response.
    BlockBodies = 0x06,
    /// Trie node and code request.
    GetNodeData = 0x0d,
    /// Trie node and code response.
    NodeData = 0x0e,
    /// Receipt request.
    GetReceipts = 0x0f,
    /// Receipt response.
    Receipts = 0x10,
}

impl EthMessageId {
    /// Returns the code of the response answering this request, or `None` if this is not
    /// a request.
    pub const fn response(&self) -> Option<Self> {
        match self {
            Self::GetBlockHeaders => Some(Self::BlockHeaders),
            Self::GetBlockBodies => Some(Self::BlockBodies),
            Self::GetNodeData => Some(Self::NodeData),
            Self::GetReceipts => Some(Self::Receipts),
            _ => None,
        }
    }

    /// Returns true for request codes.
    pub const fn is_request(&self) -> bool {
        self.response().is_some()
    }
}

impl From<EthMessageId> for u8 {
    fn from(id: EthMessageId) -> Self {
        id as Self
    }
}

impl TryFrom<u8> for EthMessageId {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0x00 => Self::Status,
            0x03 => Self::GetBlockHeaders,
            0x04 => Self::BlockHeaders,
            0x05 => Self::GetBlockBodies,
            0x06 => Self::BlockBodies,
            0x0d => Self::GetNodeData,
            0x0e => Self::NodeData,
            0x0f => Self::GetReceipts,
            0x10 => Self::Receipts,
            _ => return Err(ProtocolError::UnknownMessage(code)),
        })
    }
}
