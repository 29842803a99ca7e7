//! Per-peer session state and the serving loop.

use crate::{
    EthMessage, EthMessageId, GetBlockHeaders, ProtocolError, RawMessage, RequestTracker,
    RetrievalHandler, Status,
};
use alloy_primitives::{B256, U256};
use parking_lot::{Mutex, RwLock};
use sable_protocol::{ChainReader, StateReader};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Summary of what is known about a connected peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Negotiated protocol version.
    pub version: u32,
    /// Total difficulty of the peer's chain.
    pub difficulty: U256,
    /// Hash of the peer's best block.
    pub head: B256,
    /// The satellite `snap` protocol, if the peer runs it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<SnapInfo>,
}

/// Summary of the satellite `snap` protocol of a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapInfo {
    /// Negotiated `snap` version.
    pub version: u32,
}

/// A connected peer after a successful handshake.
#[derive(Debug)]
pub struct EthPeer {
    id: String,
    version: u32,
    snap: Option<u32>,
    head: RwLock<(B256, U256)>,
    tracker: Mutex<RequestTracker>,
}

impl EthPeer {
    /// Creates a peer announcing `head` with total difficulty `difficulty`.
    pub fn new(id: impl Into<String>, version: u32, head: B256, difficulty: U256) -> Self {
        Self {
            id: id.into(),
            version,
            snap: None,
            head: RwLock::new((head, difficulty)),
            tracker: Mutex::new(RequestTracker::new()),
        }
    }

    /// Creates a peer from the status it sent during the handshake.
    pub fn from_status(id: impl Into<String>, status: &Status) -> Self {
        Self::new(id, status.version, status.head, status.total_difficulty)
    }

    /// Records that the peer also runs the `snap` protocol.
    pub fn with_snap(mut self, version: u32) -> Self {
        self.snap = Some(version);
        self
    }

    /// Returns the peer id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the negotiated protocol version.
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the negotiated `snap` version.
    pub const fn snap_version(&self) -> Option<u32> {
        self.snap
    }

    /// Returns the announced head hash and total difficulty.
    pub fn head(&self) -> (B256, U256) {
        *self.head.read()
    }

    /// Updates the announced head.
    pub fn set_head(&self, hash: B256, difficulty: U256) {
        *self.head.write() = (hash, difficulty);
    }

    /// Returns a snapshot of the peer metadata.
    pub fn info(&self) -> PeerInfo {
        let (head, difficulty) = self.head();
        PeerInfo {
            version: self.version,
            difficulty,
            head,
            snap: self.snap.map(|version| SnapInfo { version }),
        }
    }

    /// Returns the number of requests sent to the peer and not yet answered.
    pub fn pending_requests(&self) -> usize {
        self.tracker.lock().pending()
    }

    /// Gives up on an outstanding request, returning whether it was still pending.
    pub fn cancel_request(&self, request_id: u64) -> bool {
        let cancelled = self.tracker.lock().cancel(request_id);
        if cancelled {
            debug!(target: "p2p", peer = %self.id, request_id, "Request cancelled");
        }
        cancelled
    }

    /// Builds a header request to send to the peer.
    pub fn request_headers(&self, query: GetBlockHeaders) -> RawMessage {
        self.tracker.lock().get_block_headers(query).encode()
    }

    /// Builds a body request to send to the peer.
    pub fn request_bodies(&self, hashes: Vec<B256>) -> RawMessage {
        self.tracker.lock().get_block_bodies(hashes).encode()
    }

    /// Builds a receipt request to send to the peer.
    pub fn request_receipts(&self, hashes: Vec<B256>) -> RawMessage {
        self.tracker.lock().get_receipts(hashes).encode()
    }

    /// Builds a node data request to send to the peer.
    pub fn request_node_data(&self, hashes: Vec<B256>) -> RawMessage {
        self.tracker.lock().get_node_data(hashes).encode()
    }

    /// Runs the session until `inbound` closes or the peer violates the protocol.
    ///
    /// Requests are answered through `handler` and written to `outbound` in arrival
    /// order. Responses to our own requests are matched and forwarded to `responses`.
    /// The first malformed or unexpected message ends the session with an error.
    pub async fn serve<C>(
        &self,
        handler: &RetrievalHandler<C>,
        mut inbound: mpsc::Receiver<RawMessage>,
        outbound: mpsc::Sender<RawMessage>,
        responses: mpsc::Sender<EthMessage>,
    ) -> Result<(), ProtocolError>
    where
        C: ChainReader + StateReader,
    {
        debug!(target: "p2p", peer = %self.id, version = self.version, "Serving peer");
        while let Some(raw) = inbound.recv().await {
            let message = match self.dispatch(handler, &raw) {
                Ok(message) => message,
                Err(err) => {
                    warn!(target: "p2p", peer = %self.id, %err, "Dropping peer session");
                    sable_macros::inc!(counter, crate::Metrics::SESSIONS_DROPPED);
                    return Err(err);
                }
            };
            let sent = match message {
                Outgoing::Response(response) => outbound.send(response).await.is_ok(),
                Outgoing::Delivery(response) => responses.send(response).await.is_ok(),
            };
            if !sent {
                debug!(target: "p2p", peer = %self.id, "Session channel closed");
                return Ok(());
            }
        }
        debug!(target: "p2p", peer = %self.id, "Peer disconnected");
        Ok(())
    }

    fn dispatch<C>(
        &self,
        handler: &RetrievalHandler<C>,
        raw: &RawMessage,
    ) -> Result<Outgoing, ProtocolError>
    where
        C: ChainReader + StateReader,
    {
        let message = EthMessage::decode(raw)?;
        trace!(target: "p2p", peer = %self.id, id = %message.message_id(), "Received message");
        if let Some(response) = handler.respond(&message) {
            return Ok(Outgoing::Response(response.encode()));
        }
        if matches!(message, EthMessage::Status(_)) {
            return Err(ProtocolError::UnexpectedMessage(EthMessageId::Status));
        }
        self.tracker.lock().on_response(&message)?;
        Ok(Outgoing::Delivery(message))
    }
}

/// Where a decoded message goes next.
enum Outgoing {
    /// An answer to write back to the peer.
    Response(RawMessage),
    /// A response to one of our requests.
    Delivery(EthMessage),
}
