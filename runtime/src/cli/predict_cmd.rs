//! `urlguard predict <url>`: classify one URL without starting the server.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use crate::logging;
use anyhow::Result;
use serde_json::json;
use std::process::ExitCode;
use urlguard::{ClassifierAdapter, PredictionService};

pub fn run(config: &RuntimeConfig, url: &str) -> Result<ExitCode> {
    logging::init(config.log_format, logging::CLI_FILTER)?;

    let service = PredictionService::new(ClassifierAdapter::load(&config.artifact_paths()));
    let s = Styled::new();

    match service.handle(url) {
        Ok(result) => {
            if output::is_json() {
                output::print_json(&json!(result));
            } else {
                println!("{}", result.label);
                if !output::is_quiet() {
                    eprintln!("  {} {} {}", s.ok_sym(), result.url, s.dim("classified"));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if output::is_json() {
                output::print_json(&json!({ "error": e.to_string() }));
            } else {
                eprintln!("  {} {}", s.fail_sym(), s.red(&e.to_string()));
                if !service.adapter().is_available() {
                    eprintln!(
                        "  Expected artifacts in {}. Run 'urlguard doctor' for details.",
                        config.model_dir.display()
                    );
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
