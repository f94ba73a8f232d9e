use std::sync::Once;

use tracing_subscriber::EnvFilter;

static LOGGING_INIT: Once = Once::new();

/// Installs the stderr subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    LOGGING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
