//! Outstanding request bookkeeping.

use crate::{
    EthMessage, EthMessageId, GetBlockBodies, GetBlockHeaders, GetNodeData, GetReceipts,
    ProtocolError, RequestPair,
};
use alloy_primitives::B256;
use std::collections::HashMap;

/// Allocates request ids and matches responses to the requests they answer.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_id: u64,
    pending: HashMap<u64, EthMessageId>,
}

impl RequestTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of requests awaiting a response.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Builds a header request.
    pub fn get_block_headers(&mut self, query: GetBlockHeaders) -> EthMessage {
        let id = self.track(EthMessageId::BlockHeaders);
        EthMessage::GetBlockHeaders(RequestPair::new(id, query))
    }

    /// Builds a body request.
    pub fn get_block_bodies(&mut self, hashes: Vec<B256>) -> EthMessage {
        let id = self.track(EthMessageId::BlockBodies);
        EthMessage::GetBlockBodies(RequestPair::new(id, GetBlockBodies(hashes)))
    }

    /// Builds a receipt request.
    pub fn get_receipts(&mut self, hashes: Vec<B256>) -> EthMessage {
        let id = self.track(EthMessageId::Receipts);
        EthMessage::GetReceipts(RequestPair::new(id, GetReceipts(hashes)))
    }

    /// Builds a node data request.
    pub fn get_node_data(&mut self, hashes: Vec<B256>) -> EthMessage {
        let id = self.track(EthMessageId::NodeData);
        EthMessage::GetNodeData(RequestPair::new(id, GetNodeData(hashes)))
    }

    /// Settles the request answered by `response`.
    ///
    /// Fails if the message is not a response, if no request with its id is outstanding,
    /// or if it answers a different kind of request. The request is settled either way.
    pub fn on_response(&mut self, response: &EthMessage) -> Result<(), ProtocolError> {
        let got = response.message_id();
        let request_id = match response.request_id() {
            Some(id) if !got.is_request() => id,
            _ => return Err(ProtocolError::UnexpectedMessage(got)),
        };
        let expected =
            self.pending.remove(&request_id).ok_or(ProtocolError::UnknownRequest(request_id))?;
        if expected != got {
            return Err(ProtocolError::MismatchedResponse { request_id, expected, got });
        }
        Ok(())
    }

    /// Drops an outstanding request, typically once it has timed out.
    ///
    /// Returns `false` if no request with this id was outstanding. A response arriving for a
    /// cancelled request is rejected as unknown.
    pub fn cancel(&mut self, request_id: u64) -> bool {
        self.pending.remove(&request_id).is_some()
    }

    fn track(&mut self, response: EthMessageId) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.insert(id, response);
        id
    }
}
