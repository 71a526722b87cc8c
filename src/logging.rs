use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs to stderr so `--json` output on stdout stays machine readable.
///
/// `filter` takes `EnvFilter` directives such as `info` or `tuneshift=debug`.
pub fn init_tracing(filter: &str) -> Result<()> {
    let filter_layer = EnvFilter::try_new(filter).context("Failed to create tracing filter")?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
