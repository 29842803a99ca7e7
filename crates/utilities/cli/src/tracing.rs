//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Maps a verbosity level to a log level filter.
///
/// `0` shows warnings, `1` info, `2` debug and anything higher trace.
pub(crate) const fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Initializes the global tracing subscriber.
///
/// Directives from `RUST_LOG` are honored when no filter is supplied; the verbosity level
/// only sets the default directive.
pub fn init_tracing_subscriber(
    verbosity: u8,
    env_filter: Option<impl Into<EnvFilter>>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = match env_filter {
        Some(filter) => filter.into(),
        None => EnvFilter::builder()
            .with_default_directive(level_filter(verbosity).into())
            .from_env_lossy(),
    };

    tracing_subscriber::registry().with(fmt::layer().with_target(true).with_filter(filter)).try_init()
}
