#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
extern crate tracing;

mod id;
pub use id::{ForkHash, ForkId};

mod filter;
pub use filter::{ForkFilter, Head};

mod errors;
pub use errors::ForkIdError;
