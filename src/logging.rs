use tracing_subscriber::EnvFilter;

/// Install the global subscriber for the host binary. Client requests,
/// refresh timings and dispatch failures are logged at `info`/`warn`;
/// `Settings::debug_logging` adds the per-request `debug` lines and lets
/// `RUST_LOG` pick the filter.
pub fn init(debug: bool) {
    // `RUST_LOG` is ignored unless debug logging is on.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
