//! Fork identifier validation errors.

use thiserror::Error;

/// Reasons a remote fork identifier is rejected by a [`crate::ForkFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForkIdError {
    /// The remote is on a past fork subset of ours but has not scheduled the fork we
    /// already passed. It may still be syncing or simply out of date.
    #[error("remote needs update")]
    RemoteStale,
    /// The remote runs an incompatible fork set, or our local chain is stale.
    #[error("local incompatible or needs update")]
    LocalIncompatibleOrStale,
}

impl ForkIdError {
    /// Returns true if a session with the remote should be torn down.
    ///
    /// A stale remote can still serve historical data, so only incompatibility
    /// disconnects.
    pub const fn should_disconnect(&self) -> bool {
        matches!(self, Self::LocalIncompatibleOrStale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_should_disconnect() {
        assert!(!ForkIdError::RemoteStale.should_disconnect());
        assert!(ForkIdError::LocalIncompatibleOrStale.should_disconnect());
    }

    #[test]
    fn test_messages() {
        assert_eq!(ForkIdError::RemoteStale.to_string(), "remote needs update");
        assert_eq!(
            ForkIdError::LocalIncompatibleOrStale.to_string(),
            "local incompatible or needs update"
        );
    }
}
