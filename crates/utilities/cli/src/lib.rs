#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{CliError, CliResult};

pub mod backtrace;

mod log;
pub use log::LogArgs;

mod tracing;
pub use tracing::init_tracing_subscriber;

mod styles;
pub use styles::cli_styles;

mod chain;
pub use chain::load_chain_config;
