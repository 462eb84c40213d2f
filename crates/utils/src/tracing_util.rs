//! Helpers related to tracing, used by main entrypoints

use tracing_subscriber::EnvFilter;

/// The level used when `RUST_LOG` is unset or unparseable.
const DEFAULT_LEVEL: &str = "warn";

/// Initialize tracing with the default configuration: compact events on
/// stderr, filtered by `RUST_LOG`.
pub fn initialize_tracing() {
    // Timestamps are noise for a short lived command line tool.
    let format = tracing_subscriber::fmt::format()
        .without_time()
        .with_target(false)
        .compact();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    tracing_subscriber::fmt()
        .event_format(format)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
