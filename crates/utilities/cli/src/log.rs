//! Logging arguments.

use clap::{ArgAction, Parser};

/// Log verbosity arguments shared by all subcommands.
#[derive(Parser, Default, Clone, Debug, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level. Repeat for more output (`-v` debug, `-vv` trace).
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count, global = true)]
    pub v: u8,
    /// Only print warnings and errors.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "v")]
    pub quiet: bool,
}

impl LogArgs {
    /// Returns the effective verbosity level passed to
    /// [`init_tracing_subscriber`](crate::init_tracing_subscriber).
    pub const fn level(&self) -> u8 {
        if self.quiet { 0 } else { self.v.saturating_add(1) }
    }
}
