//! Logging setup
//!
//! Logs go to stderr so stdout carries only benchmark output.

use crate::config::LogConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that switches the default filter to `debug`
pub const VERBOSE_ENV: &str = "TACHYMETER_VERBOSE";

/// Filter directive used when `RUST_LOG` is unset.
pub fn default_directive(config: &LogConfig, verbose: bool) -> String {
    let level = if verbose { "debug" } else { config.level.as_str() };
    format!("tachymeter={}", level)
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed, in which case the
/// existing one is kept.
pub fn init_logging(config: &LogConfig) -> bool {
    let verbose = std::env::var_os(VERBOSE_ENV).is_some_and(|v| !v.is_empty());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
