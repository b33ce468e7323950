//! CLI subcommand implementations for the `urlguard` binary.

pub mod doctor;
pub mod extract_cmd;
pub mod output;
pub mod predict_cmd;
pub mod serve;

use crate::config::{ConfigOverrides, LogFormat, RuntimeConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "urlguard",
    version,
    about = "Classify URLs as benign or malicious from lexical features"
)]
pub struct Cli {
    /// Emit machine-readable JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress informational output.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log line format (default: text, or URLGUARD_LOG_FORMAT).
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Directory holding model.json and label_encoder.json.
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the prediction endpoint over HTTP.
    Serve {
        /// Listen address (default 127.0.0.1, or URLGUARD_HOST).
        #[arg(long)]
        host: Option<String>,
        /// Listen port (default 5000, or URLGUARD_PORT).
        #[arg(long, short)]
        port: Option<u16>,
        /// Allowed CORS origin; repeat for several. Any origin when omitted.
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
    /// Print the feature vector of a URL.
    Extract { url: String },
    /// Classify a URL with the local model.
    Predict { url: String },
    /// Check the model artifacts and environment.
    Doctor,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            model_dir: self.model_dir.clone(),
            log_format: self.log_format,
            ..Default::default()
        };
        if let Command::Serve {
            host,
            port,
            cors_origins,
        } = &self.command
        {
            overrides.host = host.clone();
            overrides.port = *port;
            overrides.cors_origins = cors_origins.clone();
        }
        overrides
    }
}

/// Run the parsed command line.
pub async fn dispatch(cli: Cli) -> Result<ExitCode> {
    output::configure(cli.json, cli.quiet);
    let config = RuntimeConfig::resolve(cli.overrides())?;

    match cli.command {
        Command::Serve { .. } => serve::run(config).await.map(|_| ExitCode::SUCCESS),
        Command::Extract { url } => extract_cmd::run(&config, &url).map(|_| ExitCode::SUCCESS),
        Command::Predict { url } => predict_cmd::run(&config, &url),
        Command::Doctor => doctor::run(&config).map(|ready| {
            if ready {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }),
    }
}
