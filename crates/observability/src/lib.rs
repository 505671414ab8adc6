//! `carebase-observability` — process-wide tracing/logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process with the default `info` filter.
///
/// `RUST_LOG` overrides the default. Safe to call multiple times;
/// subsequent calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Initialize tracing with an explicit fallback filter.
///
/// `RUST_LOG` still wins when set, so operators keep control without a
/// rebuild.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .try_init();
}
