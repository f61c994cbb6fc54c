//! Tracing subscriber setup.
//!
//! Call [`init`] once at process start. The filter is taken from
//! `RUST_LOG` when set, otherwise everything at `info` and above is
//! emitted.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops so tests
/// can initialize logging without coordinating.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}
