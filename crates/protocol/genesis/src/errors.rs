//! Errors raised while checking a chain configuration.

use crate::Hardfork;
use thiserror::Error;

/// An invalid fork schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A fork is scheduled although a mandatory predecessor is not.
    #[error("unsupported fork ordering: {missing} not enabled, but {enabled} enabled at {block}")]
    ForkNotEnabled {
        /// The unscheduled predecessor.
        missing: Hardfork,
        /// The scheduled fork.
        enabled: Hardfork,
        /// Activation block of the scheduled fork.
        block: u64,
    },
    /// A fork activates before its predecessor.
    #[error(
        "unsupported fork ordering: {earlier} enabled at {earlier_block}, but {later} enabled at {later_block}"
    )]
    ForkOrder {
        /// The predecessor fork.
        earlier: Hardfork,
        /// Activation block of the predecessor.
        earlier_block: u64,
        /// The successor fork.
        later: Hardfork,
        /// Activation block of the successor.
        later_block: u64,
    },
}
