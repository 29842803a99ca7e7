//! CLI flags.

mod globals;
pub use globals::GlobalArgs;
