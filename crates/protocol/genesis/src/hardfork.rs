//! Block-number gated protocol upgrades.

use derive_more::Display;

/// A protocol upgrade activated at a configured block number.
///
/// Variants are declared in the order the upgrades must activate in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hardfork {
    /// Homestead.
    #[display("Homestead")]
    Homestead,
    /// The DAO fork (irregular state change).
    #[display("DAO")]
    Dao,
    /// Tangerine Whistle (EIP-150).
    #[display("Tangerine Whistle")]
    Eip150,
    /// Replay protection (EIP-155).
    #[display("EIP-155")]
    Eip155,
    /// Spurious Dragon (EIP-158).
    #[display("Spurious Dragon")]
    Eip158,
    /// Byzantium.
    #[display("Byzantium")]
    Byzantium,
    /// Constantinople.
    #[display("Constantinople")]
    Constantinople,
    /// Petersburg.
    #[display("Petersburg")]
    Petersburg,
    /// Istanbul.
    #[display("Istanbul")]
    Istanbul,
    /// Muir Glacier (difficulty bomb delay).
    #[display("Muir Glacier")]
    MuirGlacier,
    /// Berlin.
    #[display("Berlin")]
    Berlin,
    /// London.
    #[display("London")]
    London,
    /// Arrow Glacier (difficulty bomb delay).
    #[display("Arrow Glacier")]
    ArrowGlacier,
}

impl Hardfork {
    /// All forks in activation order.
    pub const ALL: [Self; 13] = [
        Self::Homestead,
        Self::Dao,
        Self::Eip150,
        Self::Eip155,
        Self::Eip158,
        Self::Byzantium,
        Self::Constantinople,
        Self::Petersburg,
        Self::Istanbul,
        Self::MuirGlacier,
        Self::Berlin,
        Self::London,
        Self::ArrowGlacier,
    ];

    /// Returns true if a chain may leave this fork unscheduled while still scheduling the
    /// forks that follow it.
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Dao | Self::MuirGlacier | Self::ArrowGlacier)
    }
}
