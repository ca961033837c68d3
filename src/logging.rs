use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, logging to stderr.
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default = if verbose { "spesa=debug" } else { "spesa=warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        // Another subscriber may already be installed (e.g. by a host application)
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .ok();
    });
}
