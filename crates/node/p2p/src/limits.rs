//! Serving ceilings.

use serde::{Deserialize, Serialize};

/// Maximum size of a single protocol message.
pub const MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

/// Ceilings applied when answering retrieval requests.
///
/// Item ceilings bound the response regardless of the amount requested. Hash lookups are
/// capped at twice the item ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServeLimits {
    /// Response size after which no further items are added.
    pub soft_response_limit: usize,
    /// Headers per response.
    pub max_headers: usize,
    /// Block bodies per response.
    pub max_bodies: usize,
    /// Receipt lists per response.
    pub max_receipts: usize,
    /// Trie nodes per response.
    pub max_node_data: usize,
    /// Side chain hops allowed while resolving an ancestor.
    pub max_non_canonical: u64,
}

impl ServeLimits {
    /// Default soft response size, 2 MiB.
    pub const SOFT_RESPONSE_LIMIT: usize = 2 * 1024 * 1024;
    /// Default item ceiling.
    pub const MAX_ITEMS: usize = 1024;
    /// Default side chain hop budget.
    pub const MAX_NON_CANONICAL: u64 = 100;
}

impl Default for ServeLimits {
    fn default() -> Self {
        Self {
            soft_response_limit: Self::SOFT_RESPONSE_LIMIT,
            max_headers: Self::MAX_ITEMS,
            max_bodies: Self::MAX_ITEMS,
            max_receipts: Self::MAX_ITEMS,
            max_node_data: Self::MAX_ITEMS,
            max_non_canonical: Self::MAX_NON_CANONICAL,
        }
    }
}
