//! Diagnostic logging for the `buildergen` binary.
//!
//! Logs go to standard error so `--stdout` output stays clean. `RUST_LOG`
//! overrides the level chosen from `--verbose`.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
pub fn init(verbose: bool) {
    let fallback = if verbose { "buildergen=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::warn!(%err, "logging was already initialised");
    }
}
