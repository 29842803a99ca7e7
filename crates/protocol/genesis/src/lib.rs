#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod hardfork;
pub use hardfork::Hardfork;

mod chain;
pub use chain::ChainConfig;

mod genesis;
pub use genesis::MAINNET_GENESIS_HASH;

mod errors;
pub use errors::ConfigError;
