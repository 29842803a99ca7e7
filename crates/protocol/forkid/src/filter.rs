//! Remote fork identifier validation.

use crate::{ForkHash, ForkId, ForkIdError};
use alloc::vec::Vec;
use alloy_primitives::B256;
use core::fmt;
use sable_genesis::ChainConfig;

/// Source of the local chain head used when validating remote fork identifiers.
pub trait Head {
    /// Returns the current local head block number.
    fn head(&self) -> u64;
}

impl<F> Head for F
where
    F: Fn() -> u64,
{
    fn head(&self) -> u64 {
        self()
    }
}

/// Validates remote fork identifiers against the local fork schedule.
///
/// The checksum after each fork is precomputed, and a [`u64::MAX`] sentinel closes
/// the schedule so the search always finds a future fork.
pub struct ForkFilter<H> {
    forks: Vec<u64>,
    sums: Vec<ForkHash>,
    head: H,
}

impl<H> fmt::Debug for ForkFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForkFilter").field("forks", &self.forks).field("sums", &self.sums).finish()
    }
}

impl<H: Head> ForkFilter<H> {
    /// Creates a filter for the given chain, reading the local head from `head`.
    pub fn new(config: &ChainConfig, genesis: B256, head: H) -> Self {
        Self::from_forks(config.fork_blocks(), genesis, head)
    }

    /// Creates a filter from an ascending list of fork block numbers.
    pub fn from_forks(mut forks: Vec<u64>, genesis: B256, head: H) -> Self {
        let mut sums = Vec::with_capacity(forks.len() + 1);
        let mut hash = ForkHash::from(genesis);
        sums.push(hash);
        for &fork in &forks {
            hash = hash.add(fork);
            sums.push(hash);
        }
        forks.push(u64::MAX);
        Self { forks, sums, head }
    }

    /// Returns the local fork identifier at the current head.
    pub fn current(&self) -> ForkId {
        let head = self.head.head();
        let i = self.forks.iter().position(|&fork| head < fork).unwrap_or(self.forks.len() - 1);
        let next = if self.forks[i] == u64::MAX { 0 } else { self.forks[i] };
        ForkId { hash: self.sums[i], next }
    }

    /// Checks whether a remote fork identifier is compatible with the local chain.
    ///
    /// The head is read once per call.
    pub fn validate(&self, id: ForkId) -> Result<(), ForkIdError> {
        let head = self.head.head();
        for (i, &fork) in self.forks.iter().enumerate() {
            if head >= fork {
                continue;
            }

            // Same fork set; reject only if the remote announces a fork we already passed.
            if self.sums[i] == id.hash {
                if id.next > 0 && head >= id.next {
                    debug!(target: "forkid", %id, head, "Remote announced a passed fork");
                    return Err(ForkIdError::LocalIncompatibleOrStale);
                }
                return Ok(());
            }

            // Remote is on a subset of our past forks.
            if let Some(j) = self.sums[..i].iter().position(|sum| *sum == id.hash) {
                if self.forks[j] != id.next {
                    debug!(target: "forkid", %id, head, "Remote is stale");
                    return Err(ForkIdError::RemoteStale);
                }
                return Ok(());
            }

            // Remote is ahead of us, on a superset of our forks.
            if self.sums[i + 1..].contains(&id.hash) {
                return Ok(());
            }

            debug!(target: "forkid", %id, head, "Remote fork set is incompatible");
            return Err(ForkIdError::LocalIncompatibleOrStale);
        }

        error!(target: "forkid", %id, head, "Fork ID validation fell through the fork schedule");
        Ok(())
    }
}

impl ForkFilter<fn() -> u64> {
    /// Creates a filter whose head is pinned at block zero, accepting any remote that
    /// is compatible with the chain at genesis.
    pub fn new_static(config: &ChainConfig, genesis: B256) -> Self {
        Self::new(config, genesis, zero_head)
    }
}

const fn zero_head() -> u64 {
    0
}
