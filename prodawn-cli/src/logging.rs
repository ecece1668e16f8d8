//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSection;

/// Install the global subscriber. Writes to stderr so `--json` output on
/// stdout stays parseable.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(cfg: &LoggingSection, verbose: bool) {
    let fallback = if verbose { "debug" } else { cfg.filter.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if cfg.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
