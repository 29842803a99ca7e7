#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod block;
pub use block::{Block, Receipt, create_bloom};

mod traits;
pub use traits::{ChainReader, ConsensusEngine, StateReader};

mod errors;
pub use errors::{ConsensusError, ValidationError};

mod validator;
pub use validator::BlockValidator;

mod gas;
pub use gas::{GAS_LIMIT_BOUND_DIVISOR, MIN_GAS_LIMIT, calc_gas_limit};

mod metrics;
pub use metrics::Metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
