#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod messages;
pub use messages::{
    BlockBodies, BlockBody, BlockHeaders, ETH_PROTOCOL_VERSION, EthMessage, EthMessageId,
    GetBlockBodies, GetBlockHeaders, GetNodeData, GetReceipts, HashOrNumber, NodeData,
    RawMessage, Receipts, RequestPair, Status,
};

mod errors;
pub use errors::{HandshakeError, ProtocolError};

mod limits;
pub use limits::{MAX_MESSAGE_SIZE, ServeLimits};

mod handler;
pub use handler::RetrievalHandler;

mod tracker;
pub use tracker::RequestTracker;

mod handshake;
pub use handshake::{ChainHead, handshake, validate_status};

mod peer;
pub use peer::{EthPeer, PeerInfo, SnapInfo};

mod node_info;
pub use node_info::NodeInfo;

mod metrics;
pub use metrics::Metrics;
