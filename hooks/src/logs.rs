//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

/// Used unless the build sets `LOG_FILTER`.
const DEFAULT_FILTER: &str = "error,hooks=debug,http_helpers=debug";

/// Route request lifecycle logs to the browser console.
///
/// Only the first call installs a subscriber; later calls are no-ops so the
/// app may call this from any entry point.
pub fn init_logging() {
    let env_filter =
        EnvFilter::new(option_env!("LOG_FILTER").unwrap_or(DEFAULT_FILTER));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_target(true)
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!("Initialized request logs");
    }
}
