//! Diagnostic logging setup.
//!
//! Installs a global `tracing` subscriber writing to stderr. The filter comes
//! from `AUTO_VERSION_LOG` when set, otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "AUTO_VERSION_LOG";

/// Default filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(verbosity: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if installed.is_ok() {
        tracing::debug!(verbosity, "logging initialized");
    }
}
