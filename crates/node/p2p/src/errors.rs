//! Errors raised by the wire protocol.

use crate::EthMessageId;
use sable_forkid::ForkIdError;
use thiserror::Error;

/// A peer violated the wire protocol. Every variant is fatal for the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The payload exceeds the maximum message size.
    #[error("message of {size} bytes exceeds the {max} byte limit")]
    MessageTooLarge {
        /// Size of the payload.
        size: usize,
        /// Maximum accepted size.
        max: usize,
    },
    /// The message code is not part of the protocol.
    #[error("unknown message code 0x{0:02x}")]
    UnknownMessage(u8),
    /// The payload could not be decoded.
    #[error("malformed {id} message: {source}")]
    Decode {
        /// The message code.
        id: EthMessageId,
        /// The underlying decoding error.
        source: alloy_rlp::Error,
    },
    /// The payload carries bytes after the message.
    #[error("{remaining} trailing bytes after {id} message")]
    TrailingBytes {
        /// The message code.
        id: EthMessageId,
        /// Number of unread bytes.
        remaining: usize,
    },
    /// The message is not valid at this point of the session.
    #[error("unexpected {0} message")]
    UnexpectedMessage(EthMessageId),
    /// A response references a request that is not outstanding.
    #[error("response to unknown request {0}")]
    UnknownRequest(u64),
    /// A response does not answer the kind of request it references.
    #[error("request {request_id} expected {expected}, got {got}")]
    MismatchedResponse {
        /// The request id.
        request_id: u64,
        /// The expected response code.
        expected: EthMessageId,
        /// The received response code.
        got: EthMessageId,
    },
}

/// The status exchange failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandshakeError {
    /// The peer is on another network.
    #[error("network id mismatch: local {local}, remote {remote}")]
    NetworkIdMismatch {
        /// Local network id.
        local: u64,
        /// Remote network id.
        remote: u64,
    },
    /// The peer has another genesis block.
    #[error("genesis mismatch: local {local}, remote {remote}")]
    GenesisMismatch {
        /// Local genesis hash.
        local: alloy_primitives::B256,
        /// Remote genesis hash.
        remote: alloy_primitives::B256,
    },
    /// The peer speaks another protocol version.
    #[error("protocol version mismatch: local {local}, remote {remote}")]
    ProtocolVersionMismatch {
        /// Local version.
        local: u32,
        /// Remote version.
        remote: u32,
    },
    /// The peer's fork ID is incompatible.
    #[error(transparent)]
    ForkId(#[from] ForkIdError),
    /// The first message was not a status message.
    #[error("expected status message, got {0}")]
    NotStatus(EthMessageId),
    /// The status message was malformed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
