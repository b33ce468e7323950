//! `urlguard extract <url>`: show the feature vector the classifier would see.

use crate::cli::output::{self, Styled};
use crate::config::RuntimeConfig;
use crate::logging;
use anyhow::Result;
use serde_json::{json, Map, Value};
use urlguard::{extract_features, SCHEMA_VERSION};

pub fn run(config: &RuntimeConfig, url: &str) -> Result<()> {
    logging::init(config.log_format, logging::CLI_FILTER)?;
    let features = extract_features(url);

    if output::is_json() {
        let named: Map<String, Value> = features
            .named()
            .iter()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();
        output::print_json(&json!({
            "url": url,
            "schema_version": SCHEMA_VERSION,
            "features": named,
            "vector": features.to_array().to_vec(),
        }));
        return Ok(());
    }

    let s = Styled::new();
    if !output::is_quiet() {
        eprintln!("  {}", s.bold(url));
        eprintln!("  {}", s.dim(&format!("schema v{SCHEMA_VERSION}")));
        eprintln!();
    }
    for (i, (name, value)) in features.named().iter().enumerate() {
        println!("  {:>2}  {name:<20} {value}", i + 1);
    }
    Ok(())
}
