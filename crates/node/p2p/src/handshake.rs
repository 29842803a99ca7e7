//! Status exchange.

use crate::{ETH_PROTOCOL_VERSION, EthMessage, HandshakeError, RawMessage, Status};
use alloy_primitives::B256;
use sable_forkid::{ForkFilter, ForkId, ForkIdError, Head};
use sable_genesis::ChainConfig;
use sable_protocol::ChainReader;

/// Reads the local head block number from a chain reader.
#[derive(Debug, Clone)]
pub struct ChainHead<C>(pub C);

impl<C: ChainReader> Head for ChainHead<C> {
    fn head(&self) -> u64 {
        self.0.current_header().number
    }
}

impl Status {
    /// Builds the local status from the current head of `chain`.
    pub fn from_chain<C: ChainReader>(
        chain: &C,
        network_id: u64,
        config: &ChainConfig,
        genesis: B256,
    ) -> Self {
        let head = chain.current_header();
        let hash = head.hash_slow();
        Self {
            version: ETH_PROTOCOL_VERSION,
            network_id,
            total_difficulty: chain.total_difficulty(hash).unwrap_or_default(),
            head: hash,
            genesis,
            fork_id: ForkId::new(config, genesis, head.number),
        }
    }
}

/// Checks the status announced by a remote peer against the local one.
///
/// A remote that looks stale is kept: it may still be syncing.
pub fn validate_status<H: Head>(
    local: &Status,
    remote: &Status,
    filter: &ForkFilter<H>,
) -> Result<(), HandshakeError> {
    let result = check_status(local, remote, filter);
    if let Err(err) = &result {
        debug!(target: "p2p", %err, remote_head = %remote.head, "Status handshake failed");
        sable_macros::inc!(counter, crate::Metrics::HANDSHAKE_FAILED, "reason" => reason(err));
    }
    result
}

fn check_status<H: Head>(
    local: &Status,
    remote: &Status,
    filter: &ForkFilter<H>,
) -> Result<(), HandshakeError> {
    if local.network_id != remote.network_id {
        return Err(HandshakeError::NetworkIdMismatch {
            local: local.network_id,
            remote: remote.network_id,
        });
    }
    if local.version != remote.version {
        return Err(HandshakeError::ProtocolVersionMismatch {
            local: local.version,
            remote: remote.version,
        });
    }
    if local.genesis != remote.genesis {
        return Err(HandshakeError::GenesisMismatch { local: local.genesis, remote: remote.genesis });
    }
    match filter.validate(remote.fork_id) {
        Err(ForkIdError::RemoteStale) => {
            debug!(target: "p2p", fork_id = %remote.fork_id, "Keeping peer with stale fork id");
            Ok(())
        }
        result => result.map_err(Into::into),
    }
}

/// Decodes the first message of a session and validates it as the remote status.
pub fn handshake<H: Head>(
    local: &Status,
    first: &RawMessage,
    filter: &ForkFilter<H>,
) -> Result<Status, HandshakeError> {
    let remote = match EthMessage::decode(first)? {
        EthMessage::Status(status) => status,
        other => return Err(HandshakeError::NotStatus(other.message_id())),
    };
    validate_status(local, &remote, filter)?;
    Ok(remote)
}

#[cfg_attr(not(feature = "metrics"), allow(dead_code))]
const fn reason(err: &HandshakeError) -> &'static str {
    match err {
        HandshakeError::NetworkIdMismatch { .. } => "network_id",
        HandshakeError::GenesisMismatch { .. } => "genesis",
        HandshakeError::ProtocolVersionMismatch { .. } => "version",
        HandshakeError::ForkId(_) => "fork_id",
        HandshakeError::NotStatus(_) => "not_status",
        HandshakeError::Protocol(_) => "protocol",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockHeaders, ProtocolError, RequestPair};
    use alloy_primitives::{Bytes, U256, hex};
    use rstest::rstest;
    use sable_forkid::ForkHash;
    use sable_genesis::MAINNET_GENESIS_HASH;
    use sable_protocol::test_utils::MemoryChain;

    const PETERSBURG_HEAD: u64 = 7_987_396;

    fn mainnet_status(fork_id: ForkId) -> Status {
        Status {
            version: ETH_PROTOCOL_VERSION,
            network_id: 1,
            total_difficulty: U256::from(17_179_869_184u64),
            head: B256::repeat_byte(0x11),
            genesis: MAINNET_GENESIS_HASH,
            fork_id,
        }
    }

    fn filter() -> ForkFilter<impl Fn() -> u64> {
        ForkFilter::new(&ChainConfig::mainnet(), MAINNET_GENESIS_HASH, || PETERSBURG_HEAD)
    }

    fn fork_id(hash: [u8; 4], next: u64) -> ForkId {
        ForkId { hash: ForkHash(hash), next }
    }

    #[rstest]
    #[case::same_fork(fork_id(hex!("668db0af"), 0))]
    #[case::far_future_fork(fork_id(hex!("668db0af"), u64::MAX))]
    #[case::stale_remote(fork_id(hex!("a00bc324"), 0))]
    fn test_accepts(#[case] remote: ForkId) {
        let local = mainnet_status(filter().current());
        assert_eq!(validate_status(&local, &mainnet_status(remote), &filter()), Ok(()));
    }

    #[test]
    fn test_rejects_unknown_fork() {
        let local = mainnet_status(filter().current());
        let remote = mainnet_status(fork_id(hex!("afec6b27"), 0));
        assert_eq!(
            validate_status(&local, &remote, &filter()),
            Err(HandshakeError::ForkId(ForkIdError::LocalIncompatibleOrStale))
        );
    }

    #[test]
    fn test_rejects_other_network() {
        let local = mainnet_status(filter().current());
        let remote = Status { network_id: 5, ..local };
        assert_eq!(
            validate_status(&local, &remote, &filter()),
            Err(HandshakeError::NetworkIdMismatch { local: 1, remote: 5 })
        );
    }

    #[test]
    fn test_rejects_other_genesis() {
        let local = mainnet_status(filter().current());
        let remote = Status { genesis: B256::ZERO, ..local };
        assert_eq!(
            validate_status(&local, &remote, &filter()),
            Err(HandshakeError::GenesisMismatch { local: MAINNET_GENESIS_HASH, remote: B256::ZERO })
        );
    }

    #[test]
    fn test_rejects_other_version() {
        let local = mainnet_status(filter().current());
        let remote = Status { version: 65, ..local };
        assert_eq!(
            validate_status(&local, &remote, &filter()),
            Err(HandshakeError::ProtocolVersionMismatch { local: 66, remote: 65 })
        );
    }

    #[test]
    fn test_handshake_decodes_status() {
        let local = mainnet_status(filter().current());
        let first = EthMessage::Status(local).encode();
        assert_eq!(handshake(&local, &first, &filter()), Ok(local));

        let first = EthMessage::BlockHeaders(RequestPair::new(1, BlockHeaders::default())).encode();
        assert_eq!(
            handshake(&local, &first, &filter()),
            Err(HandshakeError::NotStatus(crate::EthMessageId::BlockHeaders))
        );

        let first = RawMessage { id: 0x00, payload: Bytes::from_static(&[0xc1]) };
        assert!(matches!(
            handshake(&local, &first, &filter()),
            Err(HandshakeError::Protocol(ProtocolError::Decode { .. }))
        ));
    }

    #[test]
    fn test_status_from_chain() {
        let chain = MemoryChain::new(4);
        let genesis = chain.hash(0).unwrap();
        let config = ChainConfig::mainnet();
        let status = Status::from_chain(&chain, 1, &config, genesis);
        assert_eq!(status.head, chain.hash(4).unwrap());
        assert_eq!(status.total_difficulty, U256::from(5));
        assert_eq!(status.fork_id, ForkId::new(&config, genesis, 4));

        let filter = ForkFilter::new(&config, genesis, ChainHead(&chain));
        assert_eq!(filter.current(), status.fork_id);
        assert_eq!(validate_status(&status, &status, &filter), Ok(()));
    }
}
