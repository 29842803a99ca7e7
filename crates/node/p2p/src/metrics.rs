//! Metrics for peer sessions.

/// Container for the metric names recorded by the wire protocol.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of items served, labeled by `kind`.
    pub const SERVED_ITEMS: &'static str = "sable_p2p_served_items";

    /// Identifier for the counter of sessions dropped on a protocol error.
    pub const SESSIONS_DROPPED: &'static str = "sable_p2p_sessions_dropped";

    /// Identifier for the counter of failed handshakes, labeled by `reason`.
    pub const HANDSHAKE_FAILED: &'static str = "sable_p2p_handshake_failed";

    /// Describes and zeroes the wire protocol metrics.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    #[cfg(feature = "metrics")]
    fn describe() {
        metrics::describe_counter!(
            Self::SERVED_ITEMS,
            metrics::Unit::Count,
            "Items served to peers by kind"
        );
        metrics::describe_counter!(
            Self::SESSIONS_DROPPED,
            metrics::Unit::Count,
            "Peer sessions terminated by a protocol error"
        );
        metrics::describe_counter!(
            Self::HANDSHAKE_FAILED,
            metrics::Unit::Count,
            "Failed status handshakes by reason"
        );
    }

    #[cfg(feature = "metrics")]
    fn zero() {
        metrics::counter!(Self::SESSIONS_DROPPED).increment(0);
    }
}
