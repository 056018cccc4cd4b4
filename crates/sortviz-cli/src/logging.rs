use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SORTVIZ_LOG=debug`.
pub const LOG_ENV: &str = "SORTVIZ_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Logs go to stderr; stdout carries output.
///
/// A second call is a no-op.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_ok() {
        tracing::debug!(message = "logging.init", json);
    }
}
