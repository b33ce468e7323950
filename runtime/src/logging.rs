//! Tracing subscriber setup.

use crate::config::LogFormat;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter for the server when `RUST_LOG` is unset.
pub const SERVE_FILTER: &str = "urlguard=info,urlguard_runtime=info,tower_http=info";

/// Filter for one-shot CLI commands when `RUST_LOG` is unset.
pub const CLI_FILTER: &str = "urlguard=warn,urlguard_runtime=warn";

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
pub fn init(format: LogFormat, default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
