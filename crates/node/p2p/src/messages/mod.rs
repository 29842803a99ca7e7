//! Wire messages of the synchronization protocol.

mod id;
pub use id::EthMessageId;

mod pair;
pub use pair::RequestPair;

mod headers;
pub use headers::{BlockHeaders, GetBlockHeaders, HashOrNumber};

mod bodies;
pub use bodies::{BlockBodies, BlockBody, GetBlockBodies};

mod state;
pub use state::{GetNodeData, GetReceipts, NodeData, Receipts};

mod status;
pub use status::{ETH_PROTOCOL_VERSION, Status};

mod message;
pub use message::{EthMessage, RawMessage};
