//! Gas limit targeting.

/// The minimum gas limit a block may have.
pub const MIN_GAS_LIMIT: u64 = 5000;

/// Bound divisor of the gas limit, limiting how far it moves between two blocks.
pub const GAS_LIMIT_BOUND_DIVISOR: u64 = 1024;

/// Computes the gas limit of the block following a parent with `parent_gas_limit`, moving
/// towards `desired_limit` by at most `parent / 1024 - 1`.
///
/// The desired limit is raised to [`MIN_GAS_LIMIT`] if below it.
pub fn calc_gas_limit(parent_gas_limit: u64, desired_limit: u64) -> u64 {
    let delta = (parent_gas_limit / GAS_LIMIT_BOUND_DIVISOR).saturating_sub(1);
    let desired_limit = desired_limit.max(MIN_GAS_LIMIT);

    if parent_gas_limit < desired_limit {
        return parent_gas_limit.saturating_add(delta).min(desired_limit);
    }
    if parent_gas_limit > desired_limit {
        return parent_gas_limit.saturating_sub(delta).max(desired_limit);
    }
    parent_gas_limit
}
