//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Filter used when neither an explicit filter nor `RUST_LOG` is set
pub const DEFAULT_FILTER: &str = "info";

/// Resolve the log filter
///
/// An explicit, parseable filter wins, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
#[must_use]
pub fn env_filter(explicit: Option<&str>) -> EnvFilter {
    explicit
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber, logging to stderr
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(explicit: Option<&str>) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(explicit))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("tracing initialised");
    }
    installed
}
