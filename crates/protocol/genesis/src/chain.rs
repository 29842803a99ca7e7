//! The block-number fork schedule of a chain.

use crate::{ConfigError, Hardfork, MAINNET_GENESIS_HASH};
use alloc::vec::Vec;
use alloy_primitives::B256;

/// The fork schedule of a chain.
///
/// Each field holds the block number a fork activates at, or `None` if the chain never
/// schedules it. The serialized form uses the camelCase keys of the common genesis-file
/// format (`homesteadBlock`, `daoForkBlock`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChainConfig {
    /// The chain id, used for replay protection.
    pub chain_id: u64,
    /// Homestead activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub homestead_block: Option<u64>,
    /// DAO fork activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub dao_fork_block: Option<u64>,
    /// Whether the chain supports the DAO fork.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dao_fork_support: bool,
    /// EIP-150 activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub eip150_block: Option<u64>,
    /// EIP-155 activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub eip155_block: Option<u64>,
    /// EIP-158 activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub eip158_block: Option<u64>,
    /// Byzantium activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub byzantium_block: Option<u64>,
    /// Constantinople activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub constantinople_block: Option<u64>,
    /// Petersburg activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub petersburg_block: Option<u64>,
    /// Istanbul activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub istanbul_block: Option<u64>,
    /// Muir Glacier activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub muir_glacier_block: Option<u64>,
    /// Berlin activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub berlin_block: Option<u64>,
    /// London activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub london_block: Option<u64>,
    /// Arrow Glacier activation block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub arrow_glacier_block: Option<u64>,
}

impl ChainConfig {
    /// The Ethereum mainnet fork schedule, from Frontier through Arrow Glacier.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            homestead_block: Some(1_150_000),
            dao_fork_block: Some(1_920_000),
            dao_fork_support: true,
            eip150_block: Some(2_463_000),
            eip155_block: Some(2_675_000),
            eip158_block: Some(2_675_000),
            byzantium_block: Some(4_370_000),
            constantinople_block: Some(7_280_000),
            petersburg_block: Some(7_280_000),
            istanbul_block: Some(9_069_000),
            muir_glacier_block: Some(9_200_000),
            berlin_block: Some(12_244_000),
            london_block: Some(12_965_000),
            arrow_glacier_block: Some(13_773_000),
        }
    }

    /// A development schedule with every fork active from genesis.
    pub const fn dev() -> Self {
        Self {
            chain_id: 1337,
            homestead_block: Some(0),
            dao_fork_block: None,
            dao_fork_support: false,
            eip150_block: Some(0),
            eip155_block: Some(0),
            eip158_block: Some(0),
            byzantium_block: Some(0),
            constantinople_block: Some(0),
            petersburg_block: Some(0),
            istanbul_block: Some(0),
            muir_glacier_block: Some(0),
            berlin_block: Some(0),
            london_block: Some(0),
            arrow_glacier_block: Some(0),
        }
    }

    /// Returns the built-in configuration of the chain with the given genesis hash.
    pub fn for_genesis(genesis: B256) -> Option<Self> {
        (genesis == MAINNET_GENESIS_HASH).then(Self::mainnet)
    }

    /// Returns the activation block of the given fork.
    pub const fn fork_block(&self, fork: Hardfork) -> Option<u64> {
        match fork {
            Hardfork::Homestead => self.homestead_block,
            Hardfork::Dao => self.dao_fork_block,
            Hardfork::Eip150 => self.eip150_block,
            Hardfork::Eip155 => self.eip155_block,
            Hardfork::Eip158 => self.eip158_block,
            Hardfork::Byzantium => self.byzantium_block,
            Hardfork::Constantinople => self.constantinople_block,
            Hardfork::Petersburg => self.petersburg_block,
            Hardfork::Istanbul => self.istanbul_block,
            Hardfork::MuirGlacier => self.muir_glacier_block,
            Hardfork::Berlin => self.berlin_block,
            Hardfork::London => self.london_block,
            Hardfork::ArrowGlacier => self.arrow_glacier_block,
        }
    }

    /// Returns true if `fork` is active at block `number`.
    pub fn is_active(&self, fork: Hardfork, number: u64) -> bool {
        self.fork_block(fork).is_some_and(|block| block <= number)
    }

    /// Returns true if London (and with it the base fee) is active at block `number`.
    pub fn is_london(&self, number: u64) -> bool {
        self.is_active(Hardfork::London, number)
    }

    /// Returns the scheduled forks paired with their activation block, in protocol order.
    pub fn scheduled_forks(&self) -> Vec<(Hardfork, u64)> {
        Hardfork::ALL
            .iter()
            .filter_map(|fork| self.fork_block(*fork).map(|block| (*fork, block)))
            .collect()
    }

    /// Gathers the distinct fork activation blocks of the chain in ascending order.
    ///
    /// Forks activated at genesis are left out since they are already part of the genesis
    /// state, as are forks sharing a block with an earlier one.
    pub fn fork_blocks(&self) -> Vec<u64> {
        let mut forks: Vec<u64> =
            Hardfork::ALL.iter().filter_map(|fork| self.fork_block(*fork)).collect();
        forks.sort_unstable();
        forks.dedup();
        forks.retain(|block| *block != 0);
        forks
    }

    /// Checks that the scheduled forks activate in protocol order.
    ///
    /// A mandatory fork that is left unscheduled forbids scheduling any later fork.
    /// Optional forks may be skipped without affecting their successors.
    pub fn check_fork_order(&self) -> Result<(), ConfigError> {
        let mut last: Option<(Hardfork, Option<u64>)> = None;
        for fork in Hardfork::ALL {
            let block = self.fork_block(fork);
            if let Some((prev, prev_block)) = last {
                match (prev_block, block) {
                    (None, Some(block)) => {
                        return Err(ConfigError::ForkNotEnabled {
                            missing: prev,
                            enabled: fork,
                            block,
                        });
                    }
                    (Some(earlier_block), Some(later_block)) if earlier_block > later_block => {
                        return Err(ConfigError::ForkOrder {
                            earlier: prev,
                            earlier_block,
                            later: fork,
                            later_block,
                        });
                    }
                    _ => {}
                }
            }
            if !fork.is_optional() || block.is_some() {
                last = Some((fork, block));
            }
        }
        Ok(())
    }
}
