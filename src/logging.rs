//! Subscriber setup for the helper binaries.
//!
//! The library only emits `tracing` events; binaries call `init_logging` once
//! to route them to stderr, filtered by `POLYGLOT_LOG` (default `warn`).

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "POLYGLOT_LOG";
const DEFAULT_FILTER: &str = "warn";

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}
