//! `urlguard serve`: load the model once and serve `/predict`.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use crate::logging;
use crate::server::{self, AppContext};
use anyhow::Result;
use tracing::info;

/// Start the HTTP server and block until shutdown.
pub async fn run(config: RuntimeConfig) -> Result<()> {
    let s = Styled::new();

    logging::init(config.log_format, logging::SERVE_FILTER)?;
    info!("starting URLGuard v{}", env!("CARGO_PKG_VERSION"));

    // Artifacts load before the listener binds so no request sees a half-built context.
    let ctx = AppContext::load(&config);
    let ready = ctx.service.adapter().is_available();

    if !output::is_quiet() {
        let sym = if ready { s.ok_sym() } else { s.warn_sym() };
        eprintln!(
            "  {sym} URLGuard v{} on http://{}:{}",
            env!("CARGO_PKG_VERSION"),
            config.host,
            config.port
        );
        if !ready {
            eprintln!(
                "  Model not loaded from {}. Run 'urlguard doctor' for details.",
                config.model_dir.display()
            );
        }
    }

    server::run(&config, ctx).await?;

    if !output::is_quiet() {
        eprintln!("  {} URLGuard stopped.", s.ok_sym());
    }
    Ok(())
}
