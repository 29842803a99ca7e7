//! Contains subcommands for the sable node.

mod forkid;
pub use forkid::ForkIdCommand;

mod check;
pub use check::CheckForkIdCommand;

mod forks;
pub use forks::ForksCommand;
