use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing compact lines to stderr.
///
/// `RUST_LOG` wins over `level`. Stdout stays reserved for listing output.
pub fn init(level: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level/filter '{}'", level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("telemetry error: {e}"))
}
