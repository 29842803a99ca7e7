//! Metrics for block validation.

/// Container for the metric names recorded by the validator.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Identifier for the counter of blocks passing body validation.
    pub const BODY_VALIDATED: &'static str = "sable_validator_body_validated";

    /// Identifier for the counter of blocks passing state validation.
    pub const STATE_VALIDATED: &'static str = "sable_validator_state_validated";

    /// Identifier for the counter of validation failures, labeled by `kind`.
    pub const VALIDATION_FAILURE: &'static str = "sable_validator_failures";

    /// Describes and zeroes the validator metrics.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    #[cfg(feature = "metrics")]
    fn describe() {
        metrics::describe_counter!(
            Self::BODY_VALIDATED,
            metrics::Unit::Count,
            "Blocks whose body passed validation"
        );
        metrics::describe_counter!(
            Self::STATE_VALIDATED,
            metrics::Unit::Count,
            "Blocks whose post-execution state passed validation"
        );
        metrics::describe_counter!(
            Self::VALIDATION_FAILURE,
            metrics::Unit::Count,
            "Block validation failures by kind"
        );
    }

    #[cfg(feature = "metrics")]
    fn zero() {
        metrics::counter!(Self::BODY_VALIDATED).increment(0);
        metrics::counter!(Self::STATE_VALIDATED).increment(0);
    }
}
